//! Anthropic Messages API client backing both inference seams.
//!
//! Schema inference forces a tool call so the reply is a structured object;
//! categorization asks for a bare JSON mapping and returns the raw text for
//! the categorizer to extract. Calls are blocking round-trips with no retry.

use anyhow::{bail, Context, Result};
use cardex_core::Category;
use cardex_finance::CategoryInference;
use cardex_ingest::SchemaInference;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::Config;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub struct LlmClient {
    api_key: String,
    schema_model: String,
    category_model: String,
    max_tokens: i32,
}

impl LlmClient {
    pub fn from_env(cfg: &Config) -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY is not set (export it or add it to your shell profile)")?;
        Ok(Self {
            api_key,
            schema_model: cfg.llm.schema_model.clone(),
            category_model: cfg.llm.category_model.clone(),
            max_tokens: cfg.llm.max_tokens,
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(&self.api_key)?);
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn send(&self, model: &str, body: &Req) -> Result<Resp> {
        let client = reqwest::Client::new();
        let resp = client
            .post(API_URL)
            .headers(self.headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("anthropic request ({model})"))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("anthropic error: {status} {txt}");
        }

        resp.json().await.context("parse anthropic response")
    }

    async fn infer_schema_async(&self, file_name: &str, sample: &str) -> Result<serde_json::Value> {
        let body = Req {
            model: self.schema_model.clone(),
            max_tokens: self.max_tokens,
            tools: Some(vec![schema_tool()]),
            messages: vec![Msg {
                role: "user".to_string(),
                content: schema_prompt(file_name, sample),
            }],
        };

        let out = self.send(&self.schema_model, &body).await?;
        for block in out.content {
            if block.block_type == "tool_use" && block.name.as_deref() == Some("identify_csv_schema")
            {
                if let Some(input) = block.input {
                    return Ok(input);
                }
            }
        }
        bail!("no structured schema in response for {file_name}")
    }

    async fn categorize_batch_async(&self, descriptions: &[String]) -> Result<String> {
        let body = Req {
            model: self.category_model.clone(),
            max_tokens: self.max_tokens,
            tools: None,
            messages: vec![Msg {
                role: "user".to_string(),
                content: category_prompt(descriptions),
            }],
        };

        let out = self.send(&self.category_model, &body).await?;
        let mut s = String::new();
        for block in out.content {
            if block.block_type == "text" {
                if let Some(t) = block.text {
                    s.push_str(&t);
                }
            }
        }
        Ok(s.trim().to_string())
    }
}

impl SchemaInference for LlmClient {
    fn infer_schema(&self, file_name: &str, sample: &str) -> Result<serde_json::Value> {
        run_blocking(self.infer_schema_async(file_name, sample))
    }
}

impl CategoryInference for LlmClient {
    fn categorize_batch(&self, descriptions: &[String]) -> Result<String> {
        run_blocking(self.categorize_batch_async(descriptions))
    }
}

// The CLI uses #[tokio::main], so we're often already inside a runtime.
// Creating a nested runtime and calling block_on will panic.
//
// - If a runtime is already running: use block_in_place + Handle::block_on
// - Otherwise: create a runtime and block_on
fn run_blocking<T>(fut: impl Future<Output = Result<T>>) -> Result<T> {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        tokio::task::block_in_place(|| handle.block_on(fut))
    } else {
        let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
        rt.block_on(fut)
    }
}

#[derive(Serialize)]
struct Msg {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct Req {
    model: String,
    max_tokens: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<serde_json::Value>>,
    messages: Vec<Msg>,
}

#[derive(Deserialize)]
struct Resp {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
    name: Option<String>,
    input: Option<serde_json::Value>,
}

/// Structured-output contract: exactly the eight descriptor fields.
fn schema_tool() -> serde_json::Value {
    json!({
        "name": "identify_csv_schema",
        "description": "Identify the schema of a credit card or payment CSV file by specifying which columns contain date, merchant description, and amount information",
        "input_schema": {
            "type": "object",
            "properties": {
                "has_header": {
                    "type": "boolean",
                    "description": "Whether the CSV has a header row with column names"
                },
                "skip_rows": {
                    "type": "integer",
                    "description": "Number of metadata/title rows to skip before the header row (0 if header is on first line)"
                },
                "date_column": {
                    "type": "string",
                    "description": "Column name (if header exists) or column index (0-based, e.g., '0', '1') for the transaction date"
                },
                "description_column": {
                    "type": "string",
                    "description": "Column name or index for the merchant/transaction description or note"
                },
                "amount_column": {
                    "type": "string",
                    "description": "Column name or index for the transaction amount"
                },
                "date_format": {
                    "type": "string",
                    "description": "The date format string (e.g., '%m/%d/%Y', '%Y-%m-%d', '%Y-%m-%dT%H:%M:%S')"
                },
                "card_provider": {
                    "type": "string",
                    "description": "The card/payment provider name extracted from filename or content (e.g., 'AMEX', 'CHASE', 'VENMO', 'PAYPAL')"
                },
                "spending_is_negative": {
                    "type": "boolean",
                    "description": "Look at the MAJORITY of regular purchase transactions (restaurants, stores, subscriptions). True if these purchases are NEGATIVE (like -50.00 or '- $50'), False if purchases are POSITIVE (like 50.00 or '$50'). Ignore credits/refunds which are the opposite sign."
                }
            },
            "required": [
                "has_header", "skip_rows", "date_column", "description_column",
                "amount_column", "date_format", "card_provider", "spending_is_negative"
            ]
        }
    })
}

fn schema_prompt(file_name: &str, sample: &str) -> String {
    format!(
        "Analyze this credit card or payment service CSV file sample and identify the schema.\n\
         \n\
         Filename: {file_name}\n\
         \n\
         CSV Sample:\n\
         {sample}\n\
         \n\
         Identify:\n\
         1. Does it have a header row with column names?\n\
         2. How many rows need to be skipped before the header?\n\
         3. Which column contains the transaction date?\n\
         4. Which column contains the merchant/description/note?\n\
         5. Which column contains the amount?\n\
         6. What is the date format? (strptime format, e.g., '%m/%d/%Y', '%Y-%m-%dT%H:%M:%S')\n\
         7. What provider is this? (look at filename: AMEX, CHASE, BILT, VENMO, PAYPAL, etc.)\n\
         8. IMPORTANT - Look at the REGULAR PURCHASES (restaurants, stores, subscriptions - NOT credits/refunds):\n\
         - If most purchases show as POSITIVE numbers (like 19.99 or $50.00), then spending_is_negative=false\n\
         - If most purchases show as NEGATIVE numbers (like -19.99 or -$50.00), then spending_is_negative=true\n\
         \n\
         Use the identify_csv_schema tool to provide this information."
    )
}

fn category_prompt(descriptions: &[String]) -> String {
    let numbered: Vec<String> = descriptions
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}. {}", i + 1, d))
        .collect();

    format!(
        "Categorize these credit card transactions into one of these categories:\n\
         {categories}\n\
         \n\
         Transactions:\n\
         {transactions}\n\
         \n\
         Return ONLY a JSON object mapping transaction number to category. Example:\n\
         {{\"1\": \"Grocery\", \"2\": \"Food/Restaurant\", \"3\": \"Transportation\"}}\n\
         \n\
         Be specific:\n\
         - Trader Joe's, Whole Foods, Wegmans, Harris Teeter, Costco = Grocery\n\
         - Restaurants, cafes, food delivery = Food/Restaurant\n\
         - Gas, parking, ChargePoint, Uber, Lyft, tolls = Transportation\n\
         - Netflix, ChatGPT, GitHub, Adobe, etc. = Subscriptions\n\
         - GEICO, Spectrum, internet, phone bills = Utilities\n\
         - Medical, dental = Healthcare\n\
         - Amazon, IKEA (furniture), general shopping = Shopping\n\
         - BILT RENT, rent payments, apartment/housing payments = Rent/Housing\n\
         - AUTOPAY, PAYMENT, AUTOMATIC PAYMENT (payments TO the card company) = Payment/Credit\n\
         \n\
         IMPORTANT:\n\
         - Payment/Credit is ONLY for payments you make TO the credit card company (like AUTOPAY PAYMENT)\n\
         - RENT PAYMENTS (like \"BILT RENT\", \"BPS*BILT RENT\") are Rent/Housing, NOT Payment/Credit\n\
         - Card benefits/rewards (like \"AMEX Dining Credit\") should be categorized by what they offset (e.g., dining credits = Food/Restaurant)\n\
         \n\
         Response (JSON only):",
        categories = Category::prompt_list(),
        transactions = numbered.join("\n"),
    )
}
