// Example: reload a list with older items inserted above without the viewport jumping.
use scroll_recycler::{ItemRecord, ListRecycler, Recyclable, Recycler, RecyclerOptions};
use scroll_recycler_adapter::{HostedRecycler, ScrollHost};

#[derive(Debug, Default)]
struct ScrollView {
    viewport: f32,
    offset: f32,
    content: f32,
}

impl ScrollHost for ScrollView {
    fn viewport_extent(&self) -> f32 {
        self.viewport
    }

    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    fn set_content_extent(&mut self, extent: f32) {
        self.content = extent;
    }

    fn stop_movement(&mut self) {
        println!("stop requested at offset {}", self.offset);
    }
}

struct Bubble;

impl Recyclable<ItemRecord> for Bubble {
    fn set_active(&mut self, _active: bool) {}

    fn set_position(&mut self, _position: f32) {}
}

fn messages(first: usize, count: usize, start: f32) -> Vec<ItemRecord> {
    (0..count)
        .map(|i| ItemRecord::with_geometry(format!("msg {}", first + i), start + i as f32 * 60.0, 60.0))
        .collect()
}

fn main() {
    let mut r: ListRecycler<ItemRecord, Bubble> = Recycler::new(RecyclerOptions::new());
    r.register_template(|| Bubble, 4, None);

    let view = ScrollView {
        viewport: 300.0,
        ..ScrollView::default()
    };
    let mut h = HostedRecycler::new(r, view);
    h.setup(messages(100, 50, 0.0)).ok();

    h.host_mut().offset = 630.0;
    h.on_value_changed(12.0);
    println!("before: anchor={:?}", h.capture_first_visible_anchor());

    let mut reloaded = messages(80, 20, 0.0);
    reloaded.extend(messages(100, 50, 20.0 * 60.0));
    h.replace_anchored(reloaded).ok();
    println!(
        "after: offset={} content={} anchor={:?}",
        h.host().offset,
        h.host().content,
        h.capture_first_visible_anchor()
    );

    h.host_mut().offset += 1.0;
    h.on_value_changed(0.05);
}
