//! Leptos DragDrop Utilities
//!
//! File drag-and-drop for Leptos using native drag events.
//! Tracks enter/leave nesting so hovering child elements doesn't
//! flicker the drop target, and hands dropped files to a callback.

use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList};

/// Drop state signals
#[derive(Clone, Copy)]
pub struct FileDropSignals {
    /// Files are currently hovering over the drop target
    pub dragging_read: ReadSignal<bool>,
    pub dragging_write: WriteSignal<bool>,
    /// Nesting depth of dragenter events not yet matched by dragleave
    pub depth_read: ReadSignal<i32>,
    pub depth_write: WriteSignal<i32>,
}

pub fn create_file_drop_signals() -> FileDropSignals {
    let (dragging_read, dragging_write) = signal(false);
    let (depth_read, depth_write) = signal(0i32);
    FileDropSignals {
        dragging_read,
        dragging_write,
        depth_read,
        depth_write,
    }
}

/// Depth after one enter (`true`) or leave (`false`) event. Never negative.
pub fn next_depth(depth: i32, entering: bool) -> i32 {
    if entering {
        depth + 1
    } else {
        (depth - 1).max(0)
    }
}

/// Reset drop state
pub fn end_drag(dnd: &FileDropSignals) {
    dnd.depth_write.set(0);
    dnd.dragging_write.set(false);
}

/// Create dragenter handler for the drop target
pub fn make_on_dragenter(dnd: FileDropSignals) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        ev.prevent_default();
        let depth = next_depth(dnd.depth_read.get_untracked(), true);
        dnd.depth_write.set(depth);
        dnd.dragging_write.set(true);
    }
}

/// Create dragover handler. Without `prevent_default` the browser refuses the drop.
pub fn make_on_dragover(dnd: FileDropSignals) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        ev.prevent_default();
        if let Some(transfer) = ev.data_transfer() {
            transfer.set_drop_effect("copy");
        }
        if !dnd.dragging_read.get_untracked() {
            dnd.dragging_write.set(true);
        }
    }
}

/// Create dragleave handler
pub fn make_on_dragleave(dnd: FileDropSignals) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| {
        let depth = next_depth(dnd.depth_read.get_untracked(), false);
        dnd.depth_write.set(depth);
        if depth == 0 {
            dnd.dragging_write.set(false);
        }
    }
}

/// Create drop handler. `on_files` is only called when at least one file was dropped.
pub fn make_on_drop<F>(dnd: FileDropSignals, on_files: F) -> impl Fn(DragEvent) + Clone + 'static
where
    F: Fn(Vec<File>) + Clone + 'static,
{
    move |ev: DragEvent| {
        ev.prevent_default();
        end_drag(&dnd);

        let files = dropped_files(&ev);
        if !files.is_empty() {
            on_files(files);
        }
    }
}

/// Files carried by a drop event
pub fn dropped_files(ev: &DragEvent) -> Vec<File> {
    ev.data_transfer()
        .and_then(|transfer| transfer.files())
        .map(|list| files_from_list(&list))
        .unwrap_or_default()
}

/// Collect a `FileList` (from a drop or an `<input type="file">`)
pub fn files_from_list(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_tracks_nested_enter_leave() {
        let mut depth = 0;
        depth = next_depth(depth, true);
        depth = next_depth(depth, true);
        assert_eq!(depth, 2);

        depth = next_depth(depth, false);
        assert_eq!(depth, 1);
        depth = next_depth(depth, false);
        assert_eq!(depth, 0);
    }

    #[test]
    fn test_depth_never_negative() {
        assert_eq!(next_depth(0, false), 0);
    }
}
