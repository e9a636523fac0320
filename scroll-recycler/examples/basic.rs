// Example: fixed-height list driven by scroll offsets.
use scroll_recycler::{ItemRecord, ListRecycler, Recyclable, Recycler, RecyclerOptions};

#[derive(Default)]
struct Label {
    text: String,
    y: f32,
    visible: bool,
}

impl Recyclable<ItemRecord> for Label {
    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }

    fn set_position(&mut self, position: f32) {
        self.y = position;
    }
}

fn main() {
    let options = RecyclerOptions::new()
        .with_retain_buffer(1)
        .with_on_content_extent(Some(|extent| println!("content_extent={extent}")));
    let mut r: ListRecycler<ItemRecord, Label> = Recycler::new(options);
    r.register_template(Label::default, 4, Some(24.0));
    r.set_viewport_extent(240.0);

    let items = (0..100_000).map(|i| ItemRecord::new(format!("row {i}")));
    let spawned = r.setup_with(items, |label, item| {
        label.text.clone_from(&item.id);
        Ok(())
    });
    println!("spawned={spawned:?} window={:?}", r.window());

    for offset in [100.0, 2_400.0, 1_200_000.0, 0.0] {
        r.set_scroll_offset(offset);
        println!(
            "offset={offset} window={:?} active={} pool={}",
            r.window(),
            r.active_count(),
            r.pool_size()
        );
    }

    r.pool().for_each_active(|label, _| {
        if label.visible {
            println!("  {} @ {}", label.text, label.y);
        }
    });
}
