pub mod dispatch_get;
pub mod divert_location_post;
pub mod flight_log_post;
pub mod pirep_reset_get;
pub mod pirep_status_post;
pub mod pirep_submit_post;
pub mod request_common;
