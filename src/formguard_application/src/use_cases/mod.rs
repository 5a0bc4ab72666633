pub mod authentication_listener;
pub mod login_request_classifier;

#[cfg(test)]
pub(crate) mod test_support;
