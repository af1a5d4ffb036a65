//! Splitting a combined shader file into per-stage sources.
//!
//! The on-disk format packs both stages into a single text file. A line
//! containing `#shader vertex` or `#shader fragment` introduces a section,
//! and every following line belongs to that section until the next marker.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors from loading a combined shader file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be read.
    #[error("failed to read shader file {path}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A required stage section was missing or empty after parsing.
    #[error("shader file {path} has no {stage} section")]
    MissingStage {
        /// Path that was parsed.
        path: String,
        /// Name of the missing stage (`vertex` or `fragment`).
        stage: &'static str,
    },
}

/// Which section of the combined file lines are currently assigned to.
#[derive(Copy, Clone)]
enum Section {
    None,
    Vertex,
    Fragment,
}

/// Vertex and fragment shader sources split out of a combined file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    /// GLSL source for the vertex stage.
    pub vertex: String,
    /// GLSL source for the fragment stage.
    pub fragment: String,
}

impl ShaderSource {
    /// Split a combined source blob into its vertex and fragment sections.
    ///
    /// Marker lines switch the active section and are never copied into the
    /// output. A `#shader` line naming an unknown stage leaves the active
    /// section unchanged. Lines before the first recognized marker are
    /// discarded.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut section = Section::None;
        let mut out = Self::default();

        for line in input.lines() {
            if line.contains("#shader") {
                if line.contains("vertex") {
                    section = Section::Vertex;
                } else if line.contains("fragment") {
                    section = Section::Fragment;
                }
                continue;
            }

            let buffer = match section {
                Section::None => continue,
                Section::Vertex => &mut out.vertex,
                Section::Fragment => &mut out.fragment,
            };
            buffer.push_str(line);
            buffer.push('\n');
        }

        out
    }

    /// Read and split a combined shader file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, or if either stage section is
    /// missing or empty.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let parsed = Self::parse(&text);
        if let Some(stage) = parsed.missing_stage() {
            return Err(SourceError::MissingStage {
                path: path.display().to_string(),
                stage,
            });
        }
        Ok(parsed)
    }

    /// The first stage whose section is empty, if any.
    fn missing_stage(&self) -> Option<&'static str> {
        if self.vertex.trim().is_empty() {
            Some("vertex")
        } else if self.fragment.trim().is_empty() {
            Some("fragment")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_lines_to_the_marked_section() {
        let source = ShaderSource::parse(
            "#shader vertex\n\
             void main() {}\n\
             #shader fragment\n\
             uniform vec4 u_color;\n\
             void main() {}\n",
        );
        assert_eq!(source.vertex, "void main() {}\n");
        assert_eq!(source.fragment, "uniform vec4 u_color;\nvoid main() {}\n");
    }

    #[test]
    fn discards_lines_before_the_first_marker() {
        let source = ShaderSource::parse(
            "// stray comment\n\
             stray line\n\
             #shader fragment\n\
             void main() {}\n",
        );
        assert!(source.vertex.is_empty());
        assert_eq!(source.fragment, "void main() {}\n");
    }

    #[test]
    fn marker_lines_are_not_copied() {
        let source = ShaderSource::parse("#shader vertex\n#shader fragment\nline\n");
        assert!(source.vertex.is_empty());
        assert!(!source.fragment.contains("#shader"));
    }

    #[test]
    fn unknown_stage_keeps_the_active_section() {
        let source = ShaderSource::parse(
            "#shader vertex\n\
             first\n\
             #shader geometry\n\
             second\n",
        );
        assert_eq!(source.vertex, "first\nsecond\n");
        assert!(source.fragment.is_empty());
    }

    #[test]
    fn marker_detection_ignores_surrounding_text() {
        let source = ShaderSource::parse(
            "  #shader vertex // main stage\n\
             in vec2 a_position;\n",
        );
        assert_eq!(source.vertex, "in vec2 a_position;\n");
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let source = ShaderSource::parse("#shader vertex\r\nvoid main() {}\r\n");
        assert_eq!(source.vertex, "void main() {}\n");
    }

    #[test]
    fn empty_input_is_missing_both_stages() {
        let source = ShaderSource::parse("");
        assert_eq!(source.missing_stage(), Some("vertex"));
    }

    #[test]
    fn section_order_does_not_matter() {
        let source = ShaderSource::parse(
            "#shader fragment\n\
             frag\n\
             #shader vertex\n\
             vert\n",
        );
        assert_eq!(source.vertex, "vert\n");
        assert_eq!(source.fragment, "frag\n");
        assert_eq!(source.missing_stage(), None);
    }

    #[test]
    fn missing_fragment_section_is_reported() {
        let source = ShaderSource::parse("#shader vertex\nvoid main() {}\n");
        assert_eq!(source.missing_stage(), Some("fragment"));
    }

    #[test]
    fn load_reports_unreadable_files() {
        let err = ShaderSource::load(Path::new("does/not/exist.shader"))
            .expect_err("load should fail");
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
