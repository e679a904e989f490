diesel::table! {
    tasks (id) {
        id -> BigInt,
        title -> Text,
        description -> Nullable<Text>,
        due_date -> Nullable<Text>,
        status -> Text,
    }
}
