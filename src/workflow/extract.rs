use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::context::AppContext;
use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::extract;
use crate::infra::formatter_for;
use crate::services::ExportFormat;

#[derive(Debug, Clone, Default)]
pub struct ExtractRequest {
    pub input: PathBuf,
    pub format: Option<ExportFormat>,
    pub output: Option<PathBuf>,
    pub force_stdout: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDestination {
    Stdout,
    File(PathBuf),
    /// Nothing was found, so nothing was exported.
    Skipped,
}

pub struct ExtractionOutcome {
    pub tickets: Vec<Ticket>,
    pub format: ExportFormat,
    pub rendered: String,
    pub destination: ExportDestination,
}

pub async fn extract_from_file(
    ctx: &AppContext,
    request: ExtractRequest,
) -> AppResult<ExtractionOutcome> {
    let input = resolve(&ctx.config.workspace_root, &request.input);
    if !is_html_file(&input) {
        return Err(AppError::InvalidInput(format!(
            "please select an HTML file (got {})",
            input.display()
        )));
    }

    let bytes = ctx.store.read_document(&input).await?;
    if bytes.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "failed to read file content from {}",
            input.display()
        )));
    }
    debug!(path = %input.display(), bytes = bytes.len(), "read export dump");

    let tickets = tokio::task::spawn_blocking(move || extract::extract_bytes(&bytes))
        .await
        .map_err(|err| AppError::Task(err.to_string()))??;
    info!(path = %input.display(), tickets = tickets.len(), "extraction finished");

    let format = request.format.unwrap_or(ctx.config.default_format);
    let rendered = formatter_for(format).format(&tickets)?;

    let destination = if tickets.is_empty() {
        ExportDestination::Skipped
    } else if let Some(output) = request.output {
        ExportDestination::File(resolve(&ctx.config.workspace_root, &output))
    } else if format.exports_to_file() && !request.force_stdout {
        ExportDestination::File(default_export_path(
            &input,
            format,
            ctx.config.output_dir.as_deref(),
        ))
    } else {
        ExportDestination::Stdout
    };

    if let ExportDestination::File(path) = &destination {
        ctx.store.write_export(path, &rendered).await?;
        info!(path = %path.display(), format = format.as_str(), "wrote export");
    }

    Ok(ExtractionOutcome {
        tickets,
        format,
        rendered,
        destination,
    })
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn is_html_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_lowercase().ends_with(".html"))
}

/// `<dir>/<input stem><format suffix>`, defaulting `dir` to the input's folder.
pub fn default_export_path(input: &Path, format: ExportFormat, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tickets".to_string());
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{stem}{}", format.file_suffix()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::config::AppConfig;
    use crate::services::DocumentStore;

    #[derive(Default)]
    struct MemoryStore {
        files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    }

    impl MemoryStore {
        fn with_file(path: &str, contents: &str) -> Self {
            let store = Self::default();
            store
                .files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), contents.as_bytes().to_vec());
            store
        }

        fn contents(&self, path: &str) -> Option<String> {
            self.files
                .lock()
                .unwrap()
                .get(Path::new(path))
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        }
    }

    #[async_trait]
    impl DocumentStore for MemoryStore {
        async fn read_document(&self, path: &Path) -> AppResult<Vec<u8>> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| AppError::InvalidInput(format!("missing {}", path.display())))
        }

        async fn write_export(&self, path: &Path, contents: &str) -> AppResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), contents.as_bytes().to_vec());
            Ok(())
        }
    }

    const DUMP: &str = r#"
        <div id="ext-comp-1" class="x">
          <div data-caid="title">Case 300-77: Printer</div>
          <textarea name="Description">Paper jam</textarea>
          <textarea name="Resolution">Cleared "tray"
            and restarted</textarea>
        </div>
    "#;

    fn context(store: Arc<MemoryStore>) -> AppContext {
        let config = AppConfig {
            default_format: ExportFormat::Text,
            output_dir: None,
            workspace_root: PathBuf::from("/work"),
        };
        AppContext::new(config, store)
    }

    #[tokio::test]
    async fn text_goes_to_stdout_by_default() {
        let store = Arc::new(MemoryStore::with_file("/work/dump.html", DUMP));
        let ctx = context(store.clone());

        let outcome = extract_from_file(
            &ctx,
            ExtractRequest {
                input: PathBuf::from("dump.html"),
                ..ExtractRequest::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome.tickets.len(), 1);
        assert_eq!(outcome.tickets[0].ticket_id, "300-77");
        assert_eq!(outcome.destination, ExportDestination::Stdout);
        assert!(outcome.rendered.contains("Ticket #1: 300-77"));
    }

    #[tokio::test]
    async fn csv_is_written_next_to_input() {
        let store = Arc::new(MemoryStore::with_file("/work/dump.html", DUMP));
        let ctx = context(store.clone());

        let outcome = extract_from_file(
            &ctx,
            ExtractRequest {
                input: PathBuf::from("/work/dump.html"),
                format: Some(ExportFormat::Csv),
                ..ExtractRequest::default()
            },
        )
        .await
        .unwrap();

        let expected = PathBuf::from("/work/dump-ticket-data.csv");
        assert_eq!(outcome.destination, ExportDestination::File(expected));
        let written = store.contents("/work/dump-ticket-data.csv").unwrap();
        assert!(written.starts_with("Ticket ID,Description,Details,Resolution\n"));
        assert!(written.contains(r#""300-77","Paper jam","","Cleared ""tray"" "#));
        assert_eq!(written.lines().count(), 2);
    }

    #[tokio::test]
    async fn nothing_exported_when_no_tickets() {
        let store = Arc::new(MemoryStore::with_file("/work/empty.html", "<p>nothing</p>"));
        let ctx = context(store.clone());

        let outcome = extract_from_file(
            &ctx,
            ExtractRequest {
                input: PathBuf::from("empty.html"),
                format: Some(ExportFormat::Csv),
                ..ExtractRequest::default()
            },
        )
        .await
        .unwrap();

        assert!(outcome.tickets.is_empty());
        assert_eq!(outcome.destination, ExportDestination::Skipped);
        assert!(store.contents("/work/empty-ticket-data.csv").is_none());
    }

    #[tokio::test]
    async fn rejects_non_html_input() {
        let ctx = context(Arc::new(MemoryStore::default()));
        let err = extract_from_file(
            &ctx,
            ExtractRequest {
                input: PathBuf::from("notes.txt"),
                ..ExtractRequest::default()
            },
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let ctx = context(Arc::new(MemoryStore::with_file("/work/blank.HTML", "")));
        let err = extract_from_file(
            &ctx,
            ExtractRequest {
                input: PathBuf::from("blank.HTML"),
                ..ExtractRequest::default()
            },
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn export_path_prefers_configured_directory() {
        let path = default_export_path(
            Path::new("/in/case dump.html"),
            ExportFormat::Json,
            Some(Path::new("/out")),
        );
        assert_eq!(path, PathBuf::from("/out/case dump-ticket-data.json"));
    }
}
