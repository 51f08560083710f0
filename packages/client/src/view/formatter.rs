//! Dashboard formatting for terminal display.

use super::{
    command::{ElementId, NO_IMAGE_URL},
    renderer::DashboardView,
};

const RULE: &str = "============================================================";
const PROGRESS_BAR_WIDTH: usize = 30;

/// Dashboard formatter for terminal display
pub struct DashboardFormatter;

impl DashboardFormatter {
    /// Format the whole dashboard: current track, position and queue slots
    pub fn format_dashboard(view: &DashboardView) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));
        output.push_str("Now playing:\n");
        output.push_str(&Self::format_track(
            view,
            ElementId::CurrentThumbnail,
            ElementId::CurrentTitle,
            [
                ElementId::CurrentAuthor,
                ElementId::CurrentLength,
                ElementId::CurrentRequester,
            ],
        ));
        if let Some(progress) = Self::format_progress(view) {
            output.push_str(&progress);
        }

        output.push_str("Queue:\n");
        for index in 0..view.queue_slots() {
            output.push_str(&format!("{}.", index + 1));
            output.push_str(&Self::format_track(
                view,
                ElementId::QueueThumbnail(index),
                ElementId::QueueTitle(index),
                [
                    ElementId::QueueAuthor(index),
                    ElementId::QueueLength(index),
                    ElementId::QueueRequester(index),
                ],
            ));
        }
        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format one track region as a title line and a details line
    ///
    /// Regions showing the placeholder image and no link print the title only.
    fn format_track(
        view: &DashboardView,
        thumbnail: ElementId,
        title: ElementId,
        details: [ElementId; 3],
    ) -> String {
        let href = view
            .element(title)
            .and_then(|element| element.href.as_deref())
            .filter(|href| *href != "#");
        let placeholder = view
            .element(thumbnail)
            .and_then(|element| element.source.as_deref())
            .is_none_or(|source| source == NO_IMAGE_URL);

        let mut output = match href {
            Some(href) => format!("  {} <{}>\n", view.text(title), href),
            None => format!("  {}\n", view.text(title)),
        };
        if placeholder && href.is_none() {
            return output;
        }

        let labels: Vec<&str> = details
            .iter()
            .map(|id| view.text(*id))
            .filter(|text| !text.is_empty())
            .collect();
        if !labels.is_empty() {
            output.push_str(&format!("    {}\n", labels.join(" | ")));
        }
        output
    }

    /// Format the position label with a text progress bar, if visible
    fn format_progress(view: &DashboardView) -> Option<String> {
        let bar = view.element(ElementId::CurrentProgressBar)?;
        if !bar.visible {
            return None;
        }
        let percent = view
            .element(ElementId::CurrentProgress)
            .map_or(0.0, |element| element.width_percent)
            .clamp(0.0, 100.0);
        let filled = ((percent / 100.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;

        Some(format!(
            "    {} [{}{}] {:.0}%\n",
            view.text(ElementId::CurrentPosition),
            "#".repeat(filled),
            "-".repeat(PROGRESS_BAR_WIDTH - filled),
            percent
        ))
    }
}
