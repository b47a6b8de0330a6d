//! The migration state machine.
//!
//! ```text
//! start -> extract-style-table -> enumerate-target-files
//!       -> {scan -> synthesize -> rewrite} x N
//!       -> write-aggregate-style-file -> replace-global-sheet -> done
//! ```
//!
//! Each stage consumes the previous state, so stages cannot be skipped,
//! repeated, or reordered. Nothing is rolled back on failure: files written
//! by earlier stages stay on disk.

use crate::config::MigrationConfig;
use crate::error::{CompileError, MigrateError};
use crate::file_ops::atomic_write;
use crate::report::{FileReport, MigrationReport, StyleFileReport};
use codemod_core::{ComponentCollection, ComponentSynthesizer, MarkupRewriter, MarkupScanner, StyleTable};
use codemod_lang::registry::detect_language;
use r3f_common::fs_utils::{display_relative, resolve_within_root};
use r3f_common::walk::{list_files, select_targets};
use r3f_tools::{SourceFormatter, StyleCompiler};
use std::path::{Path, PathBuf};

// ── State markers ──────────────────────────────────────────────────

pub struct Start;

/// Both compiles succeeded. No project file has been touched yet.
pub struct Extracted {
    table: StyleTable,
    base_css: String,
    sheet_path: PathBuf,
}

pub struct Enumerated {
    extracted: Extracted,
    targets: Vec<PathBuf>,
}

pub struct Rewritten {
    extracted: Extracted,
    components: ComponentCollection,
}

pub struct StylesWritten {
    extracted: Extracted,
}

pub struct Done;

// ── Migration ──────────────────────────────────────────────────────

pub struct Migration<State = Start> {
    project_root: PathBuf,
    config: MigrationConfig,
    compiler: Box<dyn StyleCompiler>,
    formatter: Box<dyn SourceFormatter>,
    dry_run: bool,
    report: MigrationReport,
    state: State,
}

impl<S> Migration<S> {
    fn advance<T>(self, next: impl FnOnce(S) -> T) -> Migration<T> {
        Migration {
            project_root: self.project_root,
            config: self.config,
            compiler: self.compiler,
            formatter: self.formatter,
            dry_run: self.dry_run,
            report: self.report,
            state: next(self.state),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn report(&self) -> &MigrationReport {
        &self.report
    }

    fn relative(&self, path: &Path) -> PathBuf {
        display_relative(&self.project_root, path)
    }

    async fn persist(&self, path: &Path, content: &str) -> Result<bool, MigrateError> {
        if self.dry_run {
            tracing::info!(path = %self.relative(path).display(), "dry run, not writing");
            return Ok(false);
        }
        atomic_write(path, content.as_bytes()).map_err(MigrateError::io(path))?;
        Ok(true)
    }
}

// ── start → extract-style-table ────────────────────────────────────

impl Migration<Start> {
    pub fn new(
        project_root: impl Into<PathBuf>,
        config: MigrationConfig,
        compiler: Box<dyn StyleCompiler>,
        formatter: Box<dyn SourceFormatter>,
    ) -> Self {
        let project_root = project_root.into();
        Self {
            report: MigrationReport {
                project_root: project_root.clone(),
                ..Default::default()
            },
            project_root,
            config,
            compiler,
            formatter,
            dry_run: false,
            state: Start,
        }
    }

    /// Compute everything but write nothing.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self.report.dry_run = dry_run;
        self
    }

    /// Run every stage in order.
    pub async fn run(self) -> Result<MigrationReport, MigrateError> {
        let done = self
            .extract_style_table()
            .await?
            .enumerate_targets()?
            .rewrite_files()
            .await?
            .write_style_files()
            .await?
            .replace_global_sheet()
            .await?;
        Ok(done.into_report())
    }

    /// Compile the global sheet into a style table, and the base layer into
    /// the sheet's replacement.
    pub async fn extract_style_table(self) -> Result<Migration<Extracted>, MigrateError> {
        tracing::info!(stage = "extract-style-table", compiler = self.compiler.name());

        let sheet_path = resolve_within_root(&self.project_root, &self.config.global_stylesheet)
            .map_err(MigrateError::Config)?;
        let source = tokio::fs::read_to_string(&sheet_path)
            .await
            .map_err(|source| CompileError::Read {
                path: sheet_path.clone(),
                source,
            })?;

        let css = self
            .compiler
            .compile(&source, &self.project_root)
            .await
            .map_err(CompileError::from)?;
        let table = StyleTable::from_css(&css).map_err(CompileError::from)?;
        let base_css = self
            .compiler
            .compile(&self.config.base_layer_source, &self.project_root)
            .await
            .map_err(CompileError::from)?;

        tracing::info!(
            classes = table.len(),
            skipped_selectors = table.skipped_selectors(),
            "style table ready"
        );

        let mut next = self.advance(|_| Extracted {
            table,
            base_css,
            sheet_path,
        });
        next.report.style_table_classes = next.state.table.len();
        Ok(next)
    }
}

// ── extract-style-table → enumerate-target-files ───────────────────

impl Migration<Extracted> {
    pub fn style_table(&self) -> &StyleTable {
        &self.state.table
    }

    /// Collect the allow-listed files of each source directory, in config
    /// order, each directory listed depth-first by name.
    pub fn enumerate_targets(self) -> Result<Migration<Enumerated>, MigrateError> {
        tracing::info!(stage = "enumerate-target-files");

        let mut targets = Vec::new();
        for dir in &self.config.source_dirs {
            let dir = resolve_within_root(&self.project_root, dir).map_err(MigrateError::Config)?;
            let files = list_files(&dir).map_err(MigrateError::io(&dir))?;
            targets.extend(select_targets(
                &files,
                &self.config.target_names,
                &self.config.extensions,
            ));
        }

        tracing::info!(count = targets.len(), "target files selected");
        Ok(self.advance(|extracted| Enumerated { extracted, targets }))
    }
}

// ── enumerate-target-files → {scan → synthesize → rewrite}×N ───────

impl Migration<Enumerated> {
    pub fn targets(&self) -> &[PathBuf] {
        &self.state.targets
    }

    /// Process target files one at a time. Components accumulate in a
    /// single collection owned by this stage.
    pub async fn rewrite_files(mut self) -> Result<Migration<Rewritten>, MigrateError> {
        tracing::info!(stage = "rewrite", files = self.state.targets.len());

        let scanner = MarkupScanner::new(&self.config.class_attribute);
        let rewriter = MarkupRewriter::new(scanner.clone());
        let mut components = ComponentCollection::new();
        let targets = std::mem::take(&mut self.state.targets);

        for file in &targets {
            let report = self
                .rewrite_file(file, &scanner, &rewriter, &mut components)
                .await?;
            self.report.record_dropped(&report.dropped_tokens);
            self.report.files.push(report);
        }

        Ok(self.advance(|state| Rewritten {
            extracted: state.extracted,
            components,
        }))
    }

    async fn rewrite_file(
        &self,
        file: &Path,
        scanner: &MarkupScanner,
        rewriter: &MarkupRewriter,
        components: &mut ComponentCollection,
    ) -> Result<FileReport, MigrateError> {
        let relative = self.relative(file);
        let language = detect_language(file).map_err(|source| MigrateError::UnsupportedFile {
            file: relative.clone(),
            source,
        })?;
        let source = tokio::fs::read_to_string(file)
            .await
            .map_err(MigrateError::io(file))?;

        let elements = scanner
            .scan_source(file, &source, language)
            .map_err(|source| MigrateError::Scan {
                file: relative.clone(),
                source,
            })?;

        let synthesis = ComponentSynthesizer::new(&self.state.extracted.table)
            .with_suffix(&self.config.component_suffix)
            .synthesize_file(file, &elements, components);

        let rewritten = rewriter
            .rewrite(file, &source, language, components)
            .map_err(|err| MigrateError::from_rewrite(relative.clone(), err))?;

        let formatted = self
            .formatter
            .format(&rewritten.content, file, &self.project_root)
            .await
            .map_err(|source| MigrateError::Format {
                file: relative.clone(),
                source,
            })?;

        let written = formatted != source && self.persist(file, &formatted).await?;

        tracing::info!(
            file = %relative.display(),
            components = synthesis.created.len(),
            reused = synthesis.reused,
            dropped = synthesis.dropped_tokens.len(),
            "file processed"
        );

        Ok(FileReport {
            path: relative,
            components: synthesis.created,
            reused: synthesis.reused,
            dropped_tokens: synthesis.dropped_tokens,
            written,
        })
    }
}

// ── rewrite → write-aggregate-style-file ───────────────────────────

impl Migration<Rewritten> {
    pub fn components(&self) -> &ComponentCollection {
        &self.state.components
    }

    /// Write one style file per companion path. The file is formatted and
    /// persisted after every appended component, so it stays valid even if
    /// a later append fails.
    pub async fn write_style_files(mut self) -> Result<Migration<StylesWritten>, MigrateError> {
        tracing::info!(
            stage = "write-aggregate-style-file",
            components = self.state.components.len()
        );

        let mut style_files = Vec::new();
        for (companion, owned) in self.state.components.by_companion() {
            let relative = self.relative(companion);
            let mut content = style_file_header(self.config.client_directive);
            let mut names = Vec::with_capacity(owned.len());

            for component in owned {
                content.push('\n');
                content.push_str(&component.definition());
                content = self
                    .formatter
                    .format(&content, companion, &self.project_root)
                    .await
                    .map_err(|source| MigrateError::Format {
                        file: relative.clone(),
                        source,
                    })?;
                self.persist(companion, &content).await?;
                names.push(component.name.clone());
            }

            tracing::info!(file = %relative.display(), components = names.len(), "style file written");
            style_files.push(StyleFileReport {
                path: relative,
                components: names,
            });
        }
        self.report.style_files = style_files;

        Ok(self.advance(|state| StylesWritten {
            extracted: state.extracted,
        }))
    }
}

/// Opening lines of every generated style file.
pub fn style_file_header(client_directive: bool) -> String {
    let mut header = String::new();
    if client_directive {
        header.push_str("'use client'\n");
    }
    header.push_str("import styled from 'styled-components'\n");
    header
}

// ── write-aggregate-style-file → replace-global-sheet → done ───────

impl Migration<StylesWritten> {
    /// Overwrite the global sheet with the compiled base layer only.
    pub async fn replace_global_sheet(mut self) -> Result<Migration<Done>, MigrateError> {
        tracing::info!(stage = "replace-global-sheet");

        let Extracted {
            base_css,
            sheet_path,
            ..
        } = &self.state.extracted;
        self.persist(sheet_path, base_css).await?;
        self.report.global_stylesheet = Some(self.relative(sheet_path));

        Ok(self.advance(|_| Done))
    }
}

impl Migration<Done> {
    pub fn into_report(self) -> MigrationReport {
        tracing::info!(
            stage = "done",
            files = self.report.files.len(),
            components = self.report.component_count(),
            dropped_tokens = self.report.dropped_tokens.len(),
            "migration complete"
        );
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_file_header() {
        assert_eq!(
            style_file_header(true),
            "'use client'\nimport styled from 'styled-components'\n"
        );
        assert_eq!(
            style_file_header(false),
            "import styled from 'styled-components'\n"
        );
    }
}
