mod need_service;

pub use need_service::NeedService;
