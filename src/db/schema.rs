table! {
    disasters (id) {
        id -> BigInt,
        #[sql_name = "type"]
        kind -> Text,
        location -> Text,
        severity -> Text,
        description -> Text,
        timestamp -> Text,
        latitude -> Double,
        longitude -> Double,
    }
}

table! {
    reports (id) {
        id -> Integer,
        #[sql_name = "type"]
        kind -> Text,
        location -> Text,
        severity -> Text,
        description -> Text,
    }
}
