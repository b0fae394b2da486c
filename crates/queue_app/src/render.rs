use queue_core::{EntryLink, EntryView, QueueViewModel};

pub const HELP: &str = "commands: ingest <n> | ignore <n> | click <n> <class> | list | help | quit";

pub fn render(view: &QueueViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.entries.len() + 1);
    lines.push(format!(
        "Entries: {} | In flight: {}",
        view.entries.len(),
        view.in_flight
    ));
    lines.extend(view.entries.iter().map(render_entry));
    lines
}

fn render_entry(entry: &EntryView) -> String {
    let mut line = format!(
        "#{} {} [{}]",
        entry.entry_id,
        entry.identifier,
        entry.classes.join(" ")
    );
    for link in &entry.links {
        line.push_str(&format!(" <{}.{} {}>", EntryLink::CLASS, link.label, link.href));
    }
    if let Some(message) = entry.message.as_ref().filter(|message| message.visible) {
        line.push_str(&format!(" ({}: {})", message.style.css_class(), message.text));
    }
    line
}
