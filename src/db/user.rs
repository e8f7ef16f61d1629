use crate::db::postgres_service::PostgresService;
use crate::{
    auth::hasher,
    types::{
        error::AppError,
        form::FormErrors,
        user::{DBUserCreate, DBUserUpdate, UserExtra, UserListQuery, UserPage},
    },
};
use chrono::{NaiveDate, Utc};
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_PER_PAGE: u64 = 100;

const SEARCH_COLUMNS: [Column; 4] = [Column::Email, Column::FirstName, Column::LastName, Column::Username];

/// Lowercase the domain part of an address; the local part is left alone.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Each whitespace separated term must hit at least one search column.
fn search_condition(q: &str) -> Condition {
    let mut all = Condition::all();
    for term in q.split_whitespace() {
        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        let mut any = Condition::any();
        for column in SEARCH_COLUMNS {
            any = any.add(
                Expr::expr(Func::lower(Expr::col(column)))
                    .like(LikeExpr::new(pattern.clone()).escape('\\')),
            );
        }
        all = all.add(any);
    }
    all
}

impl PostgresService {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    async fn email_taken_by_other(&self, email: &str, id: Uuid) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .filter(Column::Id.ne(id))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(normalize_email(email)))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    /// Create a regular user. `password: None` stores an unusable password.
    pub async fn create_user(
        &self,
        email: &str,
        date_of_birth: NaiveDate,
        password: Option<&str>,
        extra: UserExtra,
    ) -> Result<UserModel, AppError> {
        if email.trim().is_empty() {
            return Err(FormErrors::single("email", "Users must have an email address").into());
        }

        let password = match password {
            Some(raw) => hasher::make_password(raw).map_err(|e| AppError::Internal(e.to_string()))?,
            None => hasher::make_unusable_password(),
        };

        self.insert_user(DBUserCreate {
            email: normalize_email(email),
            password,
            date_of_birth,
            first_name: extra.first_name.unwrap_or_default(),
            last_name: extra.last_name.unwrap_or_default(),
            nickname: extra.nickname.unwrap_or_default(),
            username: extra.username.unwrap_or_default(),
            phone_number: extra.phone_number.filter(|p| !p.is_empty()),
            is_active: extra.is_active.unwrap_or(true),
            is_admin: extra.is_admin.unwrap_or(false),
        })
        .await
    }

    /// Like `create_user`, but admin and active unless the caller says otherwise.
    pub async fn create_superuser(
        &self,
        email: &str,
        date_of_birth: NaiveDate,
        password: Option<&str>,
        mut extra: UserExtra,
    ) -> Result<UserModel, AppError> {
        extra.is_admin.get_or_insert(true);
        extra.is_active.get_or_insert(true);
        self.create_user(email, date_of_birth, password, extra).await
    }

    async fn insert_user(&self, payload: DBUserCreate) -> Result<UserModel, AppError> {
        if self.user_exists_by_email(&payload.email).await? {
            return Err(AppError::AlreadyExists);
        }
        let now = Utc::now();
        let txn = self.database_connection.begin().await?;

        let inserted = UserActive {
            id: Set(Uuid::new_v4()),
            email: Set(payload.email),
            password: Set(payload.password),
            date_of_birth: Set(payload.date_of_birth),
            first_name: Set(payload.first_name),
            last_name: Set(payload.last_name),
            nickname: Set(payload.nickname),
            username: Set(payload.username),
            phone_number: Set(payload.phone_number),
            is_active: Set(payload.is_active),
            is_admin: Set(payload.is_admin),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await;

        let user = match inserted {
            Ok(user) => user,
            Err(err) => {
                txn.rollback().await?;
                if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                    return Err(AppError::AlreadyExists);
                }
                return Err(err.into());
            }
        };

        txn.commit().await?;
        info!("created user {} (admin: {})", user.id, user.is_admin);
        Ok(user)
    }

    pub async fn list_users(&self, query: &UserListQuery, per_page: u64) -> Result<UserPage, AppError> {
        let mut finder = User::find();
        if let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            finder = finder.filter(search_condition(q));
        }
        if let Some(is_admin) = query.is_admin {
            finder = finder.filter(Column::IsAdmin.eq(is_admin));
        }
        if let Some(is_active) = query.is_active {
            finder = finder.filter(Column::IsActive.eq(is_active));
        }
        let finder = finder.order_by_asc(Column::Email).order_by_asc(Column::Id);

        let paginator = finder.paginate(&self.database_connection, per_page.max(1));
        let totals = paginator.num_items_and_pages().await?;
        let page = query.p.unwrap_or(1).max(1);
        if page > totals.number_of_pages.max(1) {
            return Err(AppError::BadRequest(format!("Invalid page ({page}).")));
        }
        debug!("listing users page {page} of {}", totals.number_of_pages);
        let results = paginator.fetch_page(page - 1).await?;

        Ok(UserPage {
            results,
            count: totals.number_of_items,
            page,
            num_pages: totals.number_of_pages,
        })
    }

    pub async fn update_user(&self, user_id: Uuid, changes: DBUserUpdate) -> Result<UserModel, AppError> {
        let email = normalize_email(&changes.email);
        let current = self.get_user_by_id(&user_id).await?;
        if self.email_taken_by_other(&email, user_id).await? {
            return Err(AppError::AlreadyExists);
        }
        let mut am: UserActive = current.into();
        am.email = Set(email);
        am.date_of_birth = Set(changes.date_of_birth);
        am.first_name = Set(changes.first_name);
        am.last_name = Set(changes.last_name);
        am.nickname = Set(changes.nickname);
        am.username = Set(changes.username);
        am.phone_number = Set(changes.phone_number);
        am.is_active = Set(changes.is_active);
        am.is_admin = Set(changes.is_admin);
        am.updated_at = Set(Utc::now());
        match am.update(&self.database_connection).await {
            Ok(user) => Ok(user),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::AlreadyExists),
                _ => Err(err.into()),
            },
        }
    }

    /// Store an already encoded password.
    pub async fn set_user_password(&self, user_id: Uuid, encoded: String) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.password = Set(encoded);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), AppError> {
        let res = User::delete_by_id(user_id)
            .exec(&self.database_connection)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        info!("deleted user {}", user_id);
        Ok(())
    }

    /// Does `raw` match the stored password? Unknown users simply don't match.
    pub async fn check_user_password(&self, email: &str, raw: &str) -> Result<bool, AppError> {
        match self.get_user_by_email(email).await {
            Ok(user) => Ok(hasher::check_password(raw, &user.password)),
            Err(AppError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
