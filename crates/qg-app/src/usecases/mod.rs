pub mod scan_session;
