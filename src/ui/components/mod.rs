pub mod preview_table;
pub mod status_banner;
