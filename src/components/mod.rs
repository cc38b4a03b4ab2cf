pub mod config_panel;
pub mod sankey;
