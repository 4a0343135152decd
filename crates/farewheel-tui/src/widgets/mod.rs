mod carousel;
mod fare_view;
mod popup;
mod status_bar;

pub use carousel::{card_slots, CardSlot, CarouselWidget};
pub use fare_view::{amount_line, tab_hit_areas, FareViewWidget};
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
