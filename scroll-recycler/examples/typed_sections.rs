// Example: heterogeneous list with one pool per row kind.
use std::sync::Arc;

use scroll_recycler::{
    InstanceError, ItemRecord, Layout, Recyclable, Recycler, RecyclerOptions, TypedRecycler,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Kind {
    Header,
    Entry,
}

struct Widget {
    kind: Kind,
    bound: Option<String>,
}

impl Recyclable<ItemRecord<Kind>> for Widget {
    fn set_active(&mut self, _active: bool) {}

    fn set_position(&mut self, _position: f32) {}

    fn bind(&mut self, item: &ItemRecord<Kind>) -> Result<(), InstanceError> {
        if item.type_tag != self.kind {
            return Err(InstanceError::new("widget kind mismatch"));
        }
        self.bound = Some(item.id.clone());
        Ok(())
    }

    fn dispose(&mut self) -> Result<(), InstanceError> {
        self.bound = None;
        Ok(())
    }
}

fn main() {
    let mut r: TypedRecycler<ItemRecord<Kind>, Widget> =
        Recycler::new_typed(Layout::Variable, RecyclerOptions::new());
    for (kind, batch) in [(Kind::Header, 1), (Kind::Entry, 4)] {
        let template = Arc::new(move || Widget { kind, bound: None });
        r.register_pool(kind, Some(template), batch, None);
    }
    r.set_viewport_extent(400.0);

    let mut items = Vec::new();
    let mut position = 0.0;
    for section in 0..50 {
        items.push(ItemRecord::typed(format!("section {section}"), position, 32.0, Kind::Header));
        position += 32.0;
        for entry in 0..8 {
            let extent = 40.0 + (entry % 3) as f32 * 20.0;
            items.push(ItemRecord::typed(
                format!("section {section} / entry {entry}"),
                position,
                extent,
                Kind::Entry,
            ));
            position += extent;
        }
    }

    match r.setup(items) {
        Ok(count) => println!("bound {count} items, content_extent={}", r.content_extent()),
        Err(err) => println!("setup failed: {err}"),
    }

    for offset in [500.0, 5_000.0, 250.0] {
        r.set_scroll_offset(offset);
        println!(
            "offset={offset} window={:?} active={} pools={}",
            r.window(),
            r.active_count(),
            r.pool_size()
        );
    }
}
