//! Instructions and the response schema sent with each request.

use engine::{Category, UnitCostType, UsageStatus};
use serde_json::{Value, json};

pub(crate) fn parse_text(text: &str) -> String {
    format!(
        "Extract shopping item details from the following text into a JSON object.\n\
         Determine the product name, price (list and actual), category and status.\n\
         If a price is mentioned as \"original\" or \"market price\", map it to listPrice.\n\
         If \"bought\" or past tense implies purchase, set status to 'bought', otherwise 'planned'.\n\
         Calculate discountRate if both prices are available ((list - actual) / list * 100).\n\
         Infer category from context.\n\n\
         Text to parse: \"{text}\""
    )
}

pub(crate) fn parse_image(context: &str) -> String {
    let mut prompt = String::from(
        "Analyze this image (screenshot of a product page, shopping cart or receipt) and \
         extract shopping item details into a JSON object.\n\
         Look for product name, price (list and actual/paid), category, status and date.\n",
    );
    if !context.is_empty() {
        prompt.push_str(&format!("Additional user context: {context}\n"));
    }
    prompt.push_str(
        "If a price is crossed out, it's the listPrice. The main price is actualPrice.\n\
         If it looks like a completed order or receipt, set status to 'bought'.\n\
         Infer category.",
    );
    prompt
}

pub(crate) fn advice(language: &str, items_json: &str) -> String {
    format!(
        "Analyze these shopping items and provide a brief, helpful financial summary and \
         advice in {language}.\n\
         Focus on spending habits, potential savings and category distribution. \
         Keep it under 100 words.\n\
         Items: {items_json}"
    )
}

/// Structured-output schema for a partial record.
pub(crate) fn record_schema() -> Value {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
    let usage: Vec<&str> = UsageStatus::ALL.iter().map(|u| u.as_str()).collect();
    let unit_cost: Vec<&str> = UnitCostType::ALL.iter().map(|u| u.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": "Product name" },
            "category": {
                "type": "STRING",
                "description": format!("One of: {}", categories.join(", ")),
            },
            "status": { "type": "STRING", "enum": ["bought", "planned"] },
            "listPrice": { "type": "NUMBER" },
            "actualPrice": { "type": "NUMBER" },
            "discountRate": { "type": "NUMBER" },
            "purchaseDate": {
                "type": "STRING",
                "description": "YYYY-MM-DD format if mentioned, otherwise empty",
            },
            "usageStatus": { "type": "STRING", "enum": usage },
            "unitCostType": { "type": "STRING", "enum": unit_cost },
            "unitCost": { "type": "NUMBER" },
            "link": { "type": "STRING" },
            "notes": { "type": "STRING", "description": "Any other details mentioned" },
        },
        "required": ["name", "actualPrice"],
    })
}
