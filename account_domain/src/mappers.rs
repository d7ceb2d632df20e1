use crate::models::User;
use account_data::entities::UserEntity;

pub fn user_entity_to_user(user: UserEntity) -> User {
    User {
        id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
        username: user.username,
        email: user.email,
        disabled: user.disabled,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}
