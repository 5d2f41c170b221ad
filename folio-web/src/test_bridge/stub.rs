pub fn install_test_bridge() {
    log::trace!("test bridge unavailable outside the browser");
}
