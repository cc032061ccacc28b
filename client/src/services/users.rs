use shared::{User, UserPayload};

super::service!(UserService, User, UserPayload, "users/");
