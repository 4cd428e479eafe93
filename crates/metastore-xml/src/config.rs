//! Codec configuration.

/// What to do with an unrecognized tag inside an attribute body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTagPolicy {
    /// Decode it as an attribute: tag name as id, trimmed text as a string
    /// value, nested tags as children.
    #[default]
    Attribute,
    /// Fail the load with `CodecError::UnknownTag`.
    Reject,
}

/// How `save` writes the destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Truncate and write the target in place. A failure mid-write can
    /// leave a partial file.
    #[default]
    Overwrite,
    /// Write a sibling temp file, then rename it over the target.
    Atomic,
}

/// Configuration for the XML codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>`.
    pub xml_declaration: bool,
    pub unknown_tags: UnknownTagPolicy,
    pub save_mode: SaveMode,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            xml_declaration: true,
            unknown_tags: UnknownTagPolicy::default(),
            save_mode: SaveMode::default(),
        }
    }
}

impl CodecConfig {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    pub fn with_unknown_tags(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tags = policy;
        self
    }

    pub fn with_save_mode(mut self, mode: SaveMode) -> Self {
        self.save_mode = mode;
        self
    }
}
