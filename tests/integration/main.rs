//! Integration tests for the Folio client stack and the public site.

mod client_test;
mod helpers;
mod manager_test;
mod site_test;
mod status_test;
