//! The seam between argument resolution and the rest of the tool.
//!
//! Argument handlers hand values they do not interpret themselves (source
//! files, variation lines, tag criteria, material descriptors, ECO tables,
//! polyglot hashes) to a [`Collaborators`] implementation. [`Registry`] simply
//! records every request so a later stage can act on it.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Whether a registered file supplies games or only duplicate-check games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Normal,
    Check,
}

/// A collaborator refused a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

#[cfg_attr(test, mockall::automock)]
pub trait Collaborators {
    fn add_source_file(&mut self, path: &Utf8Path, kind: SourceKind);

    fn add_textual_variation(&mut self, line: &str) -> Result<(), CollaboratorError>;

    fn add_positional_variation(&mut self, line: &str) -> Result<(), CollaboratorError>;

    /// One line of tag criteria, from `origin` (a file name or "command line").
    fn add_tag_criterion(&mut self, line: &str, origin: &str) -> Result<(), CollaboratorError>;

    /// One line of the output tag roster.
    fn add_roster_line(&mut self, line: &str) -> Result<(), CollaboratorError>;

    fn suppress_tag(&mut self, tag: &str);

    fn add_material_description(
        &mut self,
        descriptor: &str,
        both_colours: bool,
    ) -> Result<(), CollaboratorError>;

    fn add_fen_pattern(&mut self, pattern: &str, either_colour: bool) -> Result<(), CollaboratorError>;

    fn build_eco_table(&mut self, eco_file: &Utf8Path) -> Result<(), CollaboratorError>;

    fn match_polyglot_hash(&mut self, hash: u64);

    fn set_output_line_length(&mut self, width: u32);
}

/// A tag criterion and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCriterion {
    pub line: String,
    pub origin: String,
}

/// Records every collaborator request in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    pub sources: Vec<(Utf8PathBuf, SourceKind)>,
    pub textual_variations: Vec<String>,
    pub positional_variations: Vec<String>,
    pub tag_criteria: Vec<TagCriterion>,
    pub roster: Vec<String>,
    pub suppressed_tags: Vec<String>,
    pub materials: Vec<(String, bool)>,
    pub fen_patterns: Vec<(String, bool)>,
    pub eco_tables: Vec<Utf8PathBuf>,
    pub polyglot_hashes: Vec<u64>,
    pub line_length: Option<u32>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_files(&self, kind: SourceKind) -> impl Iterator<Item = &Utf8Path> {
        self.sources
            .iter()
            .filter(move |(_, k)| *k == kind)
            .map(|(path, _)| path.as_path())
    }
}

impl Collaborators for Registry {
    fn add_source_file(&mut self, path: &Utf8Path, kind: SourceKind) {
        self.sources.push((path.to_path_buf(), kind));
    }

    fn add_textual_variation(&mut self, line: &str) -> Result<(), CollaboratorError> {
        self.textual_variations.push(line.to_string());
        Ok(())
    }

    fn add_positional_variation(&mut self, line: &str) -> Result<(), CollaboratorError> {
        self.positional_variations.push(line.to_string());
        Ok(())
    }

    fn add_tag_criterion(&mut self, line: &str, origin: &str) -> Result<(), CollaboratorError> {
        // Recorded as given: `Tag "value"` from files, `<letter><value>` from -T.
        self.tag_criteria.push(TagCriterion {
            line: line.to_string(),
            origin: origin.to_string(),
        });
        Ok(())
    }

    fn add_roster_line(&mut self, line: &str) -> Result<(), CollaboratorError> {
        self.roster.push(line.trim().to_string());
        Ok(())
    }

    fn suppress_tag(&mut self, tag: &str) {
        self.suppressed_tags.push(tag.to_string());
    }

    fn add_material_description(
        &mut self,
        descriptor: &str,
        both_colours: bool,
    ) -> Result<(), CollaboratorError> {
        self.materials.push((descriptor.to_string(), both_colours));
        Ok(())
    }

    fn add_fen_pattern(&mut self, pattern: &str, either_colour: bool) -> Result<(), CollaboratorError> {
        self.fen_patterns.push((pattern.to_string(), either_colour));
        Ok(())
    }

    fn build_eco_table(&mut self, eco_file: &Utf8Path) -> Result<(), CollaboratorError> {
        self.eco_tables.push(eco_file.to_path_buf());
        Ok(())
    }

    fn match_polyglot_hash(&mut self, hash: u64) {
        self.polyglot_hashes.push(hash);
    }

    fn set_output_line_length(&mut self, width: u32) {
        self.line_length = Some(width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_records_sources_by_kind() {
        let mut registry = Registry::new();
        registry.add_source_file(Utf8Path::new("a.pgn"), SourceKind::Normal);
        registry.add_source_file(Utf8Path::new("b.pgn"), SourceKind::Check);
        registry.add_source_file(Utf8Path::new("c.pgn"), SourceKind::Normal);

        let normal: Vec<_> = registry.source_files(SourceKind::Normal).collect();
        assert_eq!(normal, vec![Utf8Path::new("a.pgn"), Utf8Path::new("c.pgn")]);
        assert_eq!(registry.source_files(SourceKind::Check).count(), 1);
    }

    #[test]
    fn test_tag_criteria_recorded_as_given() {
        let mut registry = Registry::new();
        registry.add_tag_criterion("White \"Fischer\"", "tags.txt").unwrap();
        registry.add_tag_criterion("wFischer", "command line").unwrap();

        let recorded: Vec<_> = registry
            .tag_criteria
            .iter()
            .map(|c| (c.line.as_str(), c.origin.as_str()))
            .collect();
        assert_eq!(
            recorded,
            vec![("White \"Fischer\"", "tags.txt"), ("wFischer", "command line")]
        );
    }
}
