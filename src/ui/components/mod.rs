pub mod data_table;
pub mod dropdown;
pub mod modal_form;
pub mod pagination_bar;
pub mod search_bar;
