//! DOM operations for the page session.

use serde_json::json;

use crate::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Root document node ID.
    async fn document_node_id(&self) -> Result<i64, CdpError> {
        let result = self
            .call("DOM.getDocument", Some(json!({"depth": 0})))
            .await?;
        result["root"]["nodeId"]
            .as_i64()
            .ok_or_else(|| CdpError::InvalidResponse("Missing document root".to_string()))
    }

    /// Query selector, returning the node ID if present.
    pub async fn query_selector(&self, selector: &str) -> Result<Option<i64>, CdpError> {
        let doc = self.document_node_id().await?;

        let result = self
            .call(
                "DOM.querySelector",
                Some(json!({
                    "nodeId": doc,
                    "selector": selector,
                })),
            )
            .await?;

        let node_id = result["nodeId"].as_i64().unwrap_or(0);
        if node_id == 0 { Ok(None) } else { Ok(Some(node_id)) }
    }

    /// Count elements matching a selector.
    pub async fn count_selector(&self, selector: &str) -> Result<usize, CdpError> {
        let doc = self.document_node_id().await?;

        let result = self
            .call(
                "DOM.querySelectorAll",
                Some(json!({
                    "nodeId": doc,
                    "selector": selector,
                })),
            )
            .await?;

        Ok(result["nodeIds"].as_array().map(|a| a.len()).unwrap_or(0))
    }

    /// Box model content quad for a node, or `None` for detached/hidden nodes.
    pub async fn content_quad(&self, node_id: i64) -> Result<Option<Vec<f64>>, CdpError> {
        let result = self
            .call("DOM.getBoxModel", Some(json!({"nodeId": node_id})))
            .await;

        match result {
            Ok(r) => {
                let quad: Vec<f64> = r["model"]["content"]
                    .as_array()
                    .map(|a| a.iter().filter_map(|v| v.as_f64()).collect())
                    .unwrap_or_default();
                Ok(Some(quad))
            }
            Err(CdpError::Protocol { code: -32000, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Focus an element.
    pub async fn focus(&self, node_id: i64) -> Result<(), CdpError> {
        self.call("DOM.focus", Some(json!({"nodeId": node_id})))
            .await?;
        Ok(())
    }

    /// Click on element by selector, dispatching real mouse events at the
    /// element's center.
    pub async fn click_selector(&self, selector: &str) -> Result<(), CdpError> {
        let node_id = self
            .query_selector(selector)
            .await?
            .ok_or_else(|| CdpError::ElementNotFound(selector.to_string()))?;

        let quad = self
            .content_quad(node_id)
            .await?
            .ok_or_else(|| CdpError::ElementNotFound(format!("{} (not visible)", selector)))?;

        let (x, y) = Self::quad_center(&quad);
        self.click(x, y).await
    }

    /// Fill an input by selector, replacing any existing value.
    pub async fn fill_selector(&self, selector: &str, value: &str) -> Result<(), CdpError> {
        let node_id = self
            .query_selector(selector)
            .await?
            .ok_or_else(|| CdpError::ElementNotFound(selector.to_string()))?;

        self.focus(node_id).await?;
        self.select_all().await?;
        self.type_text(value).await?;
        Ok(())
    }

    /// Center point of a content quad.
    pub(super) fn quad_center(quad: &[f64]) -> (f64, f64) {
        if quad.len() >= 8 {
            let x = (quad[0] + quad[2] + quad[4] + quad[6]) / 4.0;
            let y = (quad[1] + quad[3] + quad[5] + quad[7]) / 4.0;
            (x, y)
        } else {
            (0.0, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_center() {
        let quad = [0.0, 0.0, 10.0, 0.0, 10.0, 4.0, 0.0, 4.0];
        assert_eq!(PageSession::quad_center(&quad), (5.0, 2.0));
    }

    #[test]
    fn test_quad_center_short_quad() {
        assert_eq!(PageSession::quad_center(&[1.0, 2.0]), (0.0, 0.0));
    }
}
