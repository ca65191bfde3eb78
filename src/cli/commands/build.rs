use log::{debug, info};
use std::io::Write;
use std::path::Path;

use crate::cli::types::Commands;
use crate::config::{validate_config, TocConfig};
use crate::document::{self, RenderedDocument};
use crate::markdown;
use crate::utils::error::{BoxResult, TocError};
use crate::utils::fs;

/// Container id used for Markdown sources when none is configured
const MARKDOWN_CONTAINER: &str = "content";

/// Handle the build command
pub fn handle_build_command(command: &Commands, mut config: TocConfig) -> BoxResult<()> {
    if let Commands::Build {
        input,
        src,
        levels,
        dest,
        insert,
        lang,
        output,
    } = command
    {
        // Command line arguments take precedence over config files
        if let Some(src) = src {
            config.src = Some(src.clone());
        }
        if let Some(levels) = levels {
            config.levels = levels.clone();
        }
        if let Some(dest) = dest {
            config.dest = dest.clone();
        }
        if let Some(insert) = insert {
            config.insert = *insert;
        }
        if let Some(lang) = lang {
            config.lang = lang.clone();
        }
        validate_config(&config)?;

        let rendered = build_document(input, &mut config)?;
        info!(
            "Built table of contents with {} entries from {}",
            rendered.toc.headings.len(),
            input.display()
        );

        // The navigation sits in the destination, or heads the source container
        let result = rendered.html;
        match output {
            Some(path) => {
                fs::write_file(path, &result)?;
                info!("Wrote {}", path.display());
            }
            None => {
                std::io::stdout().write_all(result.as_bytes())?;
            }
        }
    }

    Ok(())
}

/// Read the input document and render its table of contents
fn build_document(input: &Path, config: &mut TocConfig) -> BoxResult<RenderedDocument> {
    if !fs::is_file(input) {
        return Err(TocError::Io(format!("Input file not found: {}", input.display())).into());
    }

    let content = fs::read_file(input)?;
    let html = if fs::is_markdown_file(input) {
        let container = config.src.get_or_insert_with(|| MARKDOWN_CONTAINER.to_string());
        debug!("Rendering Markdown {} into #{}", input.display(), container);
        markdown::markdown_to_document(&content, container)
    } else {
        content
    };

    let levels = config.requested_levels()?;
    let rendered = document::render_document(&html, config.src.as_deref(), &levels, &config.placement())?;
    Ok(rendered)
}
