use log::{debug, info};
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use crate::cli::types::Commands;
use crate::config::{validate_config, TocConfig};
use crate::navigate::{ClickEvent, PageLayout, ScrollNavigator, SimulatedPage, TokioEventLoop};
use crate::utils::error::BoxResult;

/// Extra time waited after the highlight should be gone
const SETTLE_MARGIN: Duration = Duration::from_millis(50);

/// Handle the navigate command
pub async fn handle_navigate_command(command: &Commands, mut config: TocConfig) -> BoxResult<()> {
    if let Commands::Navigate {
        href,
        layout,
        highlight_class,
        duration_ms,
        clock,
    } = command
    {
        if let Some(class) = highlight_class {
            config.highlight_class = class.clone();
        }
        if let Some(duration_ms) = duration_ms {
            config.highlight_duration_ms = *duration_ms;
        }
        if let Some(clock) = clock {
            config.highlight_clock = *clock;
        }
        validate_config(&config)?;

        let local = tokio::task::LocalSet::new();
        local.run_until(simulate_click(href, layout, &config)).await?;
    }

    Ok(())
}

/// Click `href` on the page described by `layout` and play the scroll out
async fn simulate_click(href: &str, layout: &Path, config: &TocConfig) -> BoxResult<()> {
    let page = Rc::new(SimulatedPage::new(PageLayout::load(layout)?));
    let events = Rc::new(TokioEventLoop::new());
    let options = config.highlight_options();
    let navigator = ScrollNavigator::new(Rc::clone(&page), Rc::clone(&events), options.clone());

    let mut event = ClickEvent::new(href);
    let target = match navigator.on_click(&mut event) {
        Some(target) => target,
        None => {
            info!("Nothing to navigate to for {}", href);
            return Ok(());
        }
    };

    info!(
        "Navigating to #{} ({})",
        target.element_id,
        if target.was_in_viewport { "already visible" } else { "scrolling" }
    );

    if !target.was_in_viewport {
        let scroll = page.scroll_duration();
        debug!("Scroll settles after {:?}", scroll);
        tokio::time::sleep(scroll).await;
        events.emit_scroll_end();
        // Let the observer run before reporting
        tokio::task::yield_now().await;
        info!(
            "Scroll ended at y={}; highlighted: {}",
            page.scroll_y(),
            page.has_class(&target.element_id, &options.class)
        );
    }

    tokio::time::sleep(options.duration + SETTLE_MARGIN).await;

    info!(
        "#{} highlighted {} time(s), highlight still on: {}",
        target.element_id,
        page.times_added(&target.element_id, &options.class),
        page.has_class(&target.element_id, &options.class)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const LAYOUT: &str = "viewport:\n  width: 1000\n  height: 800\nelements:\n  - id: h1-0\n    top: 100\n    width: 600\n    height: 40\n";

    fn navigate_command(href: &str, layout: PathBuf) -> Commands {
        Commands::Navigate {
            href: href.to_string(),
            layout,
            highlight_class: None,
            duration_ms: Some(20),
            clock: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigate_visible_target() {
        let dir = tempfile::tempdir().unwrap();
        let layout = dir.path().join("page.yml");
        std::fs::write(&layout, LAYOUT).unwrap();

        handle_navigate_command(&navigate_command("#h1-0", layout), TocConfig::default())
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigate_unknown_target_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let layout = dir.path().join("page.yml");
        std::fs::write(&layout, LAYOUT).unwrap();

        handle_navigate_command(&navigate_command("#missing", layout), TocConfig::default())
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigate_missing_layout_fails() {
        let dir = tempfile::tempdir().unwrap();
        let command = navigate_command("#h1-0", dir.path().join("none.yml"));
        assert!(handle_navigate_command(&command, TocConfig::default()).await.is_err());
    }
}
