pub(crate) fn default_user_agent() -> String {
    format!("flexmls_api/{}", env!("CARGO_PKG_VERSION"))
}
