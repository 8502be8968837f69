pub mod file_manager;
pub mod header;
pub mod question_card;
pub mod settings_panel;
pub mod stop_confirm;
pub mod timer_bar;
pub mod upload_panel;
