use mockall::mock;
use zelaina_engine::{
    db_types::{NewOrder, NewUser, Order, User, UserSummary},
    traits::{AuthApiError, AuthManagement, OrderApiError, OrderManagement},
};

mock! {
    pub AuthManager {}
    impl AuthManagement for AuthManager {
        async fn register_user(&self, user: NewUser) -> Result<User, AuthApiError>;
        async fn email_is_registered(&self, email: &str) -> Result<bool, AuthApiError>;
        async fn fetch_user_by_credentials(&self, email: &str, password: &str) -> Result<Option<User>, AuthApiError>;
        async fn fetch_all_users(&self) -> Result<Vec<UserSummary>, AuthApiError>;
    }
}

mock! {
    pub OrderManager {}
    impl OrderManagement for OrderManager {
        async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderApiError>;
        async fn fetch_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, OrderApiError>;
        async fn fetch_all_orders(&self) -> Result<Vec<Order>, OrderApiError>;
        async fn ping(&self) -> Result<i64, OrderApiError>;
    }
}
