//! Product list rendering.

use askama::Template;
use trendx_core::Product;

use super::format::{or_na, short_date};
use super::{Control, Fragment, RenderError};

struct ProductView {
    name: String,
    category: String,
    size: String,
    color: String,
    quantity: u32,
    price: String,
    added: String,
    control: String,
}

#[derive(Template)]
#[template(path = "products.html")]
struct ProductListTemplate<'a> {
    products: &'a [ProductView],
}

/// Render the product list, one block per product with a delete control.
///
/// # Errors
///
/// Returns [`RenderError`] if the template fails to render.
pub fn render_products(products: &[Product]) -> Result<Fragment, RenderError> {
    let mut controls = Vec::with_capacity(products.len());
    let views: Vec<ProductView> = products
        .iter()
        .map(|product| {
            let control = Control::delete_product(&product.id);
            let view = ProductView {
                name: product.name.clone(),
                category: product.category.clone(),
                size: or_na(&product.size),
                color: or_na(&product.color),
                quantity: product.quantity,
                price: product.price.to_string(),
                added: short_date(&product.created_at),
                control: control.id.clone(),
            };
            controls.push(control);
            view
        })
        .collect();

    let html = ProductListTemplate { products: &views }.render()?;
    Ok(Fragment { html, controls })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use trendx_core::Price;

    use super::*;
    use crate::api::fake::sample_product;
    use crate::render::Action;

    #[test]
    fn test_empty_list_shows_placeholder_only() {
        let fragment = render_products(&[]).unwrap();
        assert!(fragment.html.contains("No products yet. Add one to get started!"));
        assert!(!fragment.html.contains("product-item"));
        assert!(fragment.controls.is_empty());
    }

    #[test]
    fn test_price_and_stock() {
        let fragment = render_products(&[sample_product("p1", "Tee")]).unwrap();
        assert!(fragment.html.contains("$19.50"));
        assert!(fragment.html.contains("10 units"));
        assert!(fragment.html.contains("Added: 10/15/2025"));
        assert!(!fragment.html.contains("No products yet"));
    }

    #[test]
    fn test_price_always_two_decimals() {
        let mut product = sample_product("p1", "Cap");
        product.price = Price::new(Decimal::new(7, 0)).unwrap();
        let fragment = render_products(&[product]).unwrap();
        assert!(fragment.html.contains("$7.00"));
    }

    #[test]
    fn test_missing_size_and_color_show_na() {
        let mut product = sample_product("p1", "Tee");
        product.size.clear();
        let fragment = render_products(&[product]).unwrap();
        assert_eq!(fragment.html.matches("N/A").count(), 2);
    }

    #[test]
    fn test_text_fields_are_escaped() {
        let mut product = sample_product("p1", "<script>alert(\"x\")</script> & 'co'");
        product.category = "<b>bold</b>".to_string();
        let fragment = render_products(&[product]).unwrap();

        assert!(fragment.html.contains("&lt;script&gt;"));
        assert!(fragment.html.contains("&amp;"));
        assert!(fragment.html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!fragment.html.contains("<script>"));
        assert!(!fragment.html.contains("<b>"));
        assert!(!fragment.html.contains("\"x\""));
        assert!(!fragment.html.contains("'co'"));
    }

    #[test]
    fn test_one_delete_control_per_product() {
        let products = [sample_product("a1", "Tee"), sample_product("b2", "Cap")];
        let fragment = render_products(&products).unwrap();

        assert_eq!(fragment.html.matches("class=\"product-item\"").count(), 2);
        assert_eq!(fragment.controls.len(), 2);
        let control = fragment.control("delete-product-b2").unwrap();
        assert_eq!(control.action, Action::DeleteProduct("b2".into()));
        assert!(fragment.html.contains("data-control=\"delete-product-b2\""));
    }
}
