pub mod need_handler;

pub use need_handler::{
    __path_create_need, __path_delete_need, __path_toggle_need, __path_update_need, create_need,
    delete_need, toggle_need, update_need,
};
