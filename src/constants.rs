// Remote service
pub const FATSECRET_API_URL: &str = "https://platform.fatsecret.com/rest/server.api";

// Config
pub const DEFAULT_CONFIG_FILE: &str = ".fatsecret";
pub const DEFAULT_DELAY_MS: u64 = 1000;

// Dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_HELP_TEXT: &str = "Date in YYYY-MM-DD format (defaults to today)";

// Remote field names
pub const DATE_INT_FIELD: &str = "date_int";
pub const DATE_FIELD: &str = "date";

// Data kind aliases
pub const FOOD_ALIASES: &[&str] = &["food"];
pub const EXERCISE_ALIASES: &[&str] = &["exercise"];
pub const WEIGHT_ALIASES: &[&str] = &["weight"];

// Output schemas
pub const FOOD_FIELDS: &[&str] = &[
    "date",
    "food_entry_id",
    "food_entry_description",
    "meal",
    "food_id",
    "serving_id",
    "number_of_units",
    "food_entry_name",
    "calories",
    "carbohydrate",
    "protein",
    "fat",
    "saturated_fat",
    "polyunsaturated_fat",
    "monounsaturated_fat",
    "trans_fat",
    "cholesterol",
    "sodium",
    "potassium",
    "fiber",
    "sugar",
    "vitamin_a",
    "vitamin_c",
    "calcium",
    "iron",
];

pub const EXERCISE_FIELDS: &[&str] = &[
    "date",
    "exercise_id",
    "exercise_name",
    "minutes",
    "calories",
    "is_template_value",
];

pub const WEIGHT_FIELDS: &[&str] = &["date", "weight_kg"];
