//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Technicians and their credit balances.
    technicians (id) {
        /// Primary key.
        id -> Uuid,
        /// Display name.
        display_name -> Varchar,
        /// Credit balance; constrained non-negative.
        credits -> Int8,
        /// Row creation time.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Customer job leads.
    leads (id) {
        /// Primary key.
        id -> Uuid,
        /// Lifecycle status; `quoted` marks the paid tier.
        status -> Varchar,
        /// Customer quote in pounds.
        quote_price -> Nullable<Numeric>,
        /// Row creation time.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Technician holds on leads. `(lead_id, technician_id)` is unique.
    lead_assignments (id) {
        /// Primary key.
        id -> Uuid,
        /// Purchased lead.
        lead_id -> Uuid,
        /// Purchasing technician.
        technician_id -> Uuid,
        /// Technician display name at purchase time.
        technician_name -> Varchar,
        /// `assigned`, `in_progress`, `completed` or `cancelled`.
        status -> Varchar,
        /// Purchase time.
        assigned_at -> Timestamptz,
    }
}

diesel::joinable!(lead_assignments -> leads (lead_id));
diesel::joinable!(lead_assignments -> technicians (technician_id));

diesel::allow_tables_to_appear_in_same_query!(lead_assignments, leads, technicians);
