//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes a table, regenerate them with `diesel print-schema` or
//! update them by hand.

diesel::table! {
    /// Registered accounts. `email` carries a unique index.
    users (id_user) {
        id_user -> Uuid,
        name -> Varchar,
        email -> Varchar,
        phone_number -> Varchar,
        /// Argon2 PHC string.
        password -> Text,
        image_url -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Shared food listings and their remaining stock.
    foods (id_food) {
        id_food -> Uuid,
        /// Owner of the listing.
        id_user -> Uuid,
        name -> Varchar,
        description -> Text,
        category -> Varchar,
        /// Remaining stock; `CHECK (quantity >= 0)`.
        quantity -> Int4,
        image_url -> Text,
        is_active -> Bool,
        expired_at -> Nullable<Timestamptz>,
        latitude -> Varchar,
        longitude -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Requests for part of a food. `status` is 0 pending, 1 accepted,
    /// 2 rejected.
    requests (id_request) {
        id_request -> Uuid,
        /// Requester.
        id_user -> Uuid,
        id_food -> Uuid,
        status -> Int2,
        quantity -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(foods -> users (id_user));
diesel::joinable!(requests -> foods (id_food));

diesel::allow_tables_to_appear_in_same_query!(foods, requests, users);
