use serde_json::{json, Value};

use crate::errors::Result;
use crate::sam::{DRAIN, EVENT_PUSHER, FAST_DISPATCHER, MAIN_FUNC, REPORTER, SLOW_DISPATCHER};

const NAMESPACE: &str = "AWS/Lambda";
const REGION: &str = "ap-northeast-1";
const PERIOD: u32 = 60;

const BACKEND_FUNCTIONS: [&str; 5] = [EVENT_PUSHER, FAST_DISPATCHER, SLOW_DISPATCHER, REPORTER, DRAIN];
const SPREAD: [&str; 3] = ["Minimum", "Average", "Maximum"];

fn widget(title: &str, metrics: Vec<Value>) -> Value {
    json!({
        "type": "metric",
        "width": 12,
        "height": 6,
        "properties": {
            "title": title,
            "view": "timeSeries",
            "stacked": false,
            "metrics": metrics,
            "region": REGION,
            "yAxis": {
                "left": {
                    "min": 0,
                },
            },
        },
    })
}

// The function name is written `${Logical}` for the enclosing `Fn::Sub`.
fn metric(name: &str, function: &str, stat: &str) -> Value {
    json!([
        NAMESPACE,
        name,
        "FunctionName",
        format!("${{{function}}}"),
        { "stat": stat, "period": PERIOD },
    ])
}

fn backend_widget(title: &str, name: &str) -> Value {
    widget(
        title,
        BACKEND_FUNCTIONS
            .iter()
            .map(|function| metric(name, function, "Sum"))
            .collect(),
    )
}

fn spread_widget(title: &str, name: &str) -> Value {
    widget(
        title,
        SPREAD
            .iter()
            .map(|stat| metric(name, MAIN_FUNC, stat))
            .collect(),
    )
}

/// The dashboard body before it is embedded into the template.
pub fn dashboard_body() -> Value {
    json!({
        "widgets": [
            backend_widget("Backend Invocations", "Invocations"),
            backend_widget("Backend Error", "Errors"),
            widget("Main Invocations", vec![metric("Invocations", MAIN_FUNC, "Sum")]),
            widget("Main Error", vec![metric("Errors", MAIN_FUNC, "Sum")]),
            spread_widget("Main Duration", "Duration"),
            spread_widget("Main ConcurrentExecutions", "ConcurrentExecutions"),
        ],
    })
}

pub fn dashboard(stack_name: &str) -> Result<Value> {
    let body = serde_json::to_string(&dashboard_body())?;
    Ok(json!({
        "Type": "AWS::CloudWatch::Dashboard",
        "Properties": {
            "DashboardName": format!("{stack_name}-dashboard"),
            "DashboardBody": {
                "Fn::Sub": body,
            },
        },
    }))
}
