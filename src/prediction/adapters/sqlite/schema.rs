//! Diesel schema for prediction persistence.

diesel::table! {
    /// Append-only log of scored predictions.
    predictions (id) {
        /// Auto-incrementing record identifier.
        id -> Integer,
        /// Rainfall in millimetres.
        rainfall_mm -> Double,
        /// Average temperature in degrees Celsius.
        temperature_celsius -> Double,
        /// Days from planting to harvest.
        days_to_harvest -> Integer,
        /// Fertilizer flag (0/1).
        fertilizer_used -> Integer,
        /// Irrigation flag (0/1).
        irrigation_used -> Integer,
        /// Region literal.
        region -> Text,
        /// Soil type literal.
        soil_type -> Text,
        /// Crop literal.
        crop -> Text,
        /// Weather literal.
        weather -> Text,
        /// Rounded model output.
        predicted_yield -> Double,
        /// Insertion timestamp (UTC).
        created_at -> Timestamp,
    }
}
