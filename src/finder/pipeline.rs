//! Predicate/action pipeline
//!
//! An ordered sequence of steps built once from the command line and
//! evaluated against every visited entry. Predicates fold into a boolean
//! accumulator; actions fire only while that accumulator is still true.

use std::io::{self, Write};
use std::path::Path;

use glob::Pattern;

use super::filter::{self, FileType};
use super::listing;
use super::metadata::EntryMetadata;

/// One unit of the pipeline: a pure predicate or a printing action.
///
/// Predicate arguments are resolved at parse time, so a constructed step
/// never fails at evaluation time.
#[derive(Debug, Clone)]
pub enum Step {
    /// -print: write the entry path
    Print,
    /// -ls: write a detailed listing line
    Ls,
    /// -user: entry owner equals the resolved uid
    User(u32),
    /// -name: glob match on the base name
    Name(Pattern),
    /// -type: entry type equals the given code
    Type(FileType),
}

impl Step {
    /// Actions produce output; predicates only gate it
    pub fn is_action(&self) -> bool {
        matches!(self, Step::Print | Step::Ls)
    }
}

/// Ordered step sequence. Insertion order is command-line flag order and
/// evaluation order. Built once at startup and read-only during traversal.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Whether any action step is present
    pub fn has_action(&self) -> bool {
        self.steps.iter().any(Step::is_action)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run the pipeline against one entry.
    ///
    /// The accumulator starts true; predicates AND their result in and the
    /// accumulator gates the actions. Actions never change it. Predicates
    /// after a failing one are still folded in, matching the original
    /// left-to-right evaluation; they are pure, so this is observationally
    /// the same as short-circuiting.
    pub fn evaluate<W: Write>(
        &self,
        path: &Path,
        meta: &EntryMetadata,
        out: &mut W,
    ) -> io::Result<()> {
        let mut matched = true;

        for step in &self.steps {
            match step {
                Step::User(uid) => matched &= filter::matches_owner(*uid, meta),
                Step::Name(pattern) => matched &= filter::matches_name(pattern, path),
                Step::Type(file_type) => matched &= file_type.matches(meta),
                Step::Print => {
                    if matched {
                        writeln!(out, "{}", path.display())?;
                    }
                }
                Step::Ls => {
                    if matched {
                        writeln!(out, "{}", listing::format_entry(path, meta))?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write as _;
    use tempfile::TempDir;

    use super::super::metadata::fetch;

    fn file_fixture() -> (TempDir, std::path::PathBuf, EntryMetadata) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("note.txt");
        File::create(&path).unwrap().write_all(b"test").unwrap();
        let meta = fetch(&path).unwrap();
        (temp_dir, path, meta)
    }

    fn run(pipeline: &Pipeline, path: &Path, meta: &EntryMetadata) -> String {
        let mut out = Vec::new();
        pipeline.evaluate(path, meta, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print_fires_without_predicates() {
        let (_tmp, path, meta) = file_fixture();
        let mut pipeline = Pipeline::new();
        pipeline.push(Step::Print);

        let output = run(&pipeline, &path, &meta);
        assert_eq!(output, format!("{}\n", path.display()));
    }

    #[test]
    fn test_failing_predicate_gates_action() {
        let (_tmp, path, meta) = file_fixture();
        let mut pipeline = Pipeline::new();
        pipeline.push(Step::Type(FileType::Directory));
        pipeline.push(Step::Print);

        assert!(run(&pipeline, &path, &meta).is_empty());
    }

    #[test]
    fn test_action_before_failing_predicate_fires() {
        // Flag order is evaluation order: -print before a failing -type
        // still prints, the accumulator is only false afterwards.
        let (_tmp, path, meta) = file_fixture();
        let mut pipeline = Pipeline::new();
        pipeline.push(Step::Print);
        pipeline.push(Step::Type(FileType::Directory));
        pipeline.push(Step::Ls);

        let output = run(&pipeline, &path, &meta);
        assert_eq!(output, format!("{}\n", path.display()));
    }

    #[test]
    fn test_accumulator_stays_false() {
        // A later passing predicate cannot rescue an already-false accumulator
        let (_tmp, path, meta) = file_fixture();
        let mut pipeline = Pipeline::new();
        pipeline.push(Step::Type(FileType::Directory));
        pipeline.push(Step::Type(FileType::Regular));
        pipeline.push(Step::Print);

        assert!(run(&pipeline, &path, &meta).is_empty());
    }

    #[test]
    fn test_all_predicates_pass() {
        let (_tmp, path, meta) = file_fixture();
        let mut pipeline = Pipeline::new();
        pipeline.push(Step::Type(FileType::Regular));
        pipeline.push(Step::Name(Pattern::new("*.txt").unwrap()));
        pipeline.push(Step::User(meta.uid));
        pipeline.push(Step::Print);

        let output = run(&pipeline, &path, &meta);
        assert_eq!(output, format!("{}\n", path.display()));
    }

    #[test]
    fn test_owner_mismatch_gates_all_actions() {
        let (_tmp, path, meta) = file_fixture();
        let mut pipeline = Pipeline::new();
        pipeline.push(Step::User(meta.uid.wrapping_add(1)));
        pipeline.push(Step::Print);
        pipeline.push(Step::Ls);

        assert!(run(&pipeline, &path, &meta).is_empty());
    }

    #[test]
    fn test_has_action() {
        let mut pipeline = Pipeline::new();
        assert!(!pipeline.has_action());
        pipeline.push(Step::Type(FileType::Regular));
        assert!(!pipeline.has_action());
        pipeline.push(Step::Ls);
        assert!(pipeline.has_action());
    }
}
