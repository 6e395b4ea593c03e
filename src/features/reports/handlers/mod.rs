pub mod report_handler;

pub use report_handler::{
    __path_create_report, __path_list_reports, __path_report_feed, create_report, list_reports,
    report_feed, ReportsState,
};
