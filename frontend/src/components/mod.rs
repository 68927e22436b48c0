pub mod destination_card;
pub mod destination_form;
pub mod map_component;
pub mod notice;
pub mod panel;
pub mod sort_button;
