use super::*;

#[test]
fn config_uses_page_origin_for_callback() {
    let config = app_config(Some("http://localhost:4200"));
    assert_eq!(config.callback_url, "http://localhost:4200/authenticate");
    assert_eq!(config.session_duration_minutes, 60);
    assert_eq!(config.magic_link_expiry_minutes, 60);
}

#[test]
fn config_falls_back_to_relative_callback() {
    assert_eq!(app_config(None).callback_url, "/authenticate");
    assert_eq!(app_config(Some("not a url")).callback_url, "/authenticate");
}
