// src/ui/widgets/mod.rs

pub mod footer;
pub mod home;
pub mod input;
pub mod nav;
pub mod panel;
pub mod results;
pub mod scan_page;
