use dashboard::ChartSpec;
use serde_json::{Value, json};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
extern "C" {
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method)]
    pub fn destroy(this: &Chart);
}

/// Doughnut chart config in Chart.js' declarative form.
pub fn doughnut_config(spec: &ChartSpec) -> Value {
    json!({
        "type": "doughnut",
        "data": {
            "labels": spec.labels,
            "datasets": [{
                "data": spec.values,
                "backgroundColor": spec.colors,
            }],
        },
        "options": {
            "plugins": {
                "legend": { "position": spec.legend.as_str() },
                "title": { "display": true, "text": spec.title },
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::doughnut_config;
    use dashboard::{ChartConfig, ChartSlot, ChartSpec};
    use formats::VoteCount;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn doughnut_config_keeps_vote_order() {
        let votes = vec![VoteCount::new("B. Second", 40), VoteCount::new("A. First", 60)];
        let spec = ChartSpec::from_votes(ChartSlot::Vice, &ChartConfig::vice(), &votes);
        let config = doughnut_config(&spec);

        assert_eq!(config["type"], json!("doughnut"));
        assert_eq!(config["data"]["labels"], json!(["B. Second", "A. First"]));
        assert_eq!(config["data"]["datasets"][0]["data"], json!([40, 60]));
        assert_eq!(
            config["data"]["datasets"][0]["backgroundColor"],
            json!(["#ffb34d", "#ff4da6"])
        );
        assert_eq!(config["options"]["plugins"]["legend"]["position"], json!("bottom"));
        assert_eq!(
            config["options"]["plugins"]["title"]["text"],
            json!("Vice Presidential Votes")
        );
    }

    #[test]
    fn empty_votes_give_empty_dataset() {
        let spec = ChartSpec::from_votes(ChartSlot::President, &ChartConfig::president(), &[]);
        let config = doughnut_config(&spec);
        assert_eq!(config["data"]["labels"], json!([]));
        assert_eq!(config["data"]["datasets"][0]["data"], json!([]));
    }
}
