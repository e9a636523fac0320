/// The scroll container a [`crate::HostedRecycler`] is attached to.
///
/// Implemented by the toolkit layer (a scroll view, a list widget, a test double). Extents and
/// offsets are measured along the scroll axis in the host's units.
pub trait ScrollHost {
    /// Visible length of the scroll container.
    fn viewport_extent(&self) -> f32;

    fn scroll_offset(&self) -> f32;

    /// Moves the container without emitting a scroll notification back to the recycler.
    fn set_scroll_offset(&mut self, offset: f32);

    /// Sizes the scrollable content (scroll track, scrollbar range).
    fn set_content_extent(&mut self, extent: f32);

    /// Halts any inertial movement in progress.
    fn stop_movement(&mut self);
}

impl<H: ScrollHost + ?Sized> ScrollHost for &mut H {
    fn viewport_extent(&self) -> f32 {
        (**self).viewport_extent()
    }

    fn scroll_offset(&self) -> f32 {
        (**self).scroll_offset()
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        (**self).set_scroll_offset(offset);
    }

    fn set_content_extent(&mut self, extent: f32) {
        (**self).set_content_extent(extent);
    }

    fn stop_movement(&mut self) {
        (**self).stop_movement();
    }
}
