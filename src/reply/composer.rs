
use tracing::info;

use super::responses::ResponseTable;
use crate::catalog::Product;
use crate::nlp::intent::{BuiltinIntent, IntentLabel};
use crate::utils::safe_truncate_ellipsis;

pub const PRODUCT_LIST_INTRO: &str = "✨ Đây là các sản phẩm mình tìm được:";
pub const PRODUCT_NOT_FOUND: &str = "Xin lỗi, mình không tìm thấy sản phẩm này trong kho hiện tại. 😊";
pub const STORE_INFO_DEFAULT: &str = "🏪 Cửa hàng mình mở cửa từ 8h sáng đến 9h tối mỗi ngày nhé!";
pub const OUT_OF_SCOPE: &str = "Xin lỗi, mình chỉ có thể hỗ trợ về sản phẩm và cửa hàng thôi nhé 😊";
pub const NOT_UNDERSTOOD: &str = "Mình chưa hiểu rõ, bạn nói lại giúp nhé.";

const REPLY_PREVIEW_CHARS: usize = 100;


pub struct ReplyComposer {
    responses: ResponseTable,
    static_url_prefix: String,
}

impl ReplyComposer {
    pub fn new(responses: ResponseTable, static_url_prefix: impl Into<String>) -> Self {
        Self {
            responses,
            static_url_prefix: static_url_prefix.into(),
        }
    }


    pub fn compose(&self, intent: &IntentLabel, matches: &[Product]) -> String {
        match intent.builtin() {
            Some(BuiltinIntent::FindProduct) if matches.is_empty() => PRODUCT_NOT_FOUND.to_string(),
            Some(BuiltinIntent::FindProduct) => self.product_listing(matches),
            Some(BuiltinIntent::StoreInfo) => self
                .responses
                .get_or(BuiltinIntent::StoreInfo.as_str(), STORE_INFO_DEFAULT)
                .to_string(),
            Some(BuiltinIntent::Unknown) => OUT_OF_SCOPE.to_string(),
            None => self.responses.get_or(intent.as_str(), NOT_UNDERSTOOD).to_string(),
        }
    }


    pub fn respond(&self, message: &str, intent: &IntentLabel, matches: &[Product]) -> String {
        let reply = self.compose(intent, matches);
        info!(
            user = %message,
            intent = %intent,
            "bot: {}",
            safe_truncate_ellipsis(&reply, REPLY_PREVIEW_CHARS)
        );
        reply
    }

    fn product_listing(&self, products: &[Product]) -> String {
        let mut lines = Vec::with_capacity(products.len() + 1);
        lines.push(
            self.responses
                .get_or(BuiltinIntent::FindProduct.as_str(), PRODUCT_LIST_INTRO)
                .to_string(),
        );

        for product in products {
            let image_html = product
                .image_ref()
                .map(|image| {
                    format!(
                        r#"<br><img src="{}" alt="{}" style="width:160px; border-radius:8px; margin:6px 0;">"#,
                        self.image_src(image),
                        product.name
                    )
                })
                .unwrap_or_default();

            lines.push(format!(
                "<br>💎 <b>{}</b> — {} VND{}<br>👉 {}",
                product.name,
                format_price(product.price),
                image_html,
                product.description_or_empty()
            ));
        }

        lines.join("<br>")
    }

    pub fn image_src(&self, image: &str) -> String {
        if image.starts_with("http") || image.starts_with('/') {
            image.to_string()
        } else {
            format!("{}/{}", self.static_url_prefix.trim_end_matches('/'), image)
        }
    }
}


pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{}", price as i64)
    } else {
        format!("{price}")
    }
}
