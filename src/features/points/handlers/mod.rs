pub mod point_handler;

pub use point_handler::{
    __path_create_point, __path_delete_point, __path_get_point, __path_list_points,
    __path_my_points, __path_nearby_points, __path_update_point, __path_update_point_status,
    create_point, delete_point, get_point, list_points, my_points, nearby_points, update_point,
    update_point_status,
};
