//! Food entry data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// food_entries row
#[derive(FromRow, Serialize, Debug)]
pub struct FoodEntry {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub meal_type: String,
    #[serde(rename = "logged_at")]
    pub timestamp: Option<String>,
}

/// POST /api/foods request body
#[derive(Deserialize, Debug)]
pub struct CreateFoodPayload {
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    pub meal_type: Option<String>,
}
