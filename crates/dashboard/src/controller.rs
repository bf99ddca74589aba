//! Section controller.
//!
//! [`Dashboard`] owns the API handle and the surface. It tracks the active
//! section, runs the loaders, handles form submissions and dispatches the
//! actions bound to rendered controls.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use trendx_core::{OrderId, OrderStatus, ProductId};

use crate::api::{ApiError, ShopApi};
use crate::forms::{
    CustomerForm, FormError, FormKind, FormSubmission, OrderForm, ProductForm,
};
use crate::render::{self, Action, Fragment, RenderError};
use crate::section::Section;
use crate::surface::{ConnectionStatus, Surface, Target};

const CONFIRM_DELETE_PRODUCT: &str = "Are you sure you want to delete this product?";

/// Errors from a controller operation.
///
/// By the time one is returned it has already been logged and, where the
/// user needs to know, shown on the surface.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Form(#[from] FormError),
}

/// The dashboard page controller.
#[derive(Debug)]
pub struct Dashboard<A, S> {
    api: A,
    surface: S,
    active: Option<Section>,
    /// Controls of the fragments currently on the surface, by control id.
    controls: HashMap<String, (Target, Action)>,
}

impl<A: ShopApi, S: Surface> Dashboard<A, S> {
    /// Create a controller with no active section.
    pub fn new(api: A, surface: S) -> Self {
        Self {
            api,
            surface,
            active: None,
            controls: HashMap::new(),
        }
    }

    /// The currently visible section, if the page has been initialised.
    pub const fn active(&self) -> Option<Section> {
        self.active
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Whether `control_id` is bound to a control currently on the surface.
    pub fn is_bound(&self, control_id: &str) -> bool {
        self.controls.contains_key(control_id)
    }

    /// Page start-up: show the dashboard section and run all four loaders.
    #[instrument(skip(self))]
    pub async fn init(&mut self) {
        self.surface.show_section(Section::Dashboard);
        self.active = Some(Section::Dashboard);

        for section in Section::ALL {
            // Loaders log and surface their own failures.
            let _ = self.load(section).await;
        }
        info!("Dashboard initialised");
    }

    /// Make `section` the only visible section and load it.
    ///
    /// # Errors
    ///
    /// Returns the loader's error; it has already been logged.
    #[instrument(skip(self))]
    pub async fn activate(&mut self, section: Section) -> Result<(), DashboardError> {
        self.surface.show_section(section);
        self.active = Some(section);
        self.load(section).await
    }

    /// Reload the active section. No-op before initialisation.
    ///
    /// # Errors
    ///
    /// Returns the loader's error; it has already been logged.
    pub async fn refresh_active(&mut self) -> Result<(), DashboardError> {
        match self.active {
            Some(section) => self.load(section).await,
            None => {
                debug!("No active section to refresh");
                Ok(())
            }
        }
    }

    /// Run the loader for `section`.
    ///
    /// # Errors
    ///
    /// Returns the loader's error; it has already been logged.
    pub async fn load(&mut self, section: Section) -> Result<(), DashboardError> {
        match section {
            Section::Dashboard => self.load_dashboard().await,
            Section::Products => self.load_products().await,
            Section::Customers => self.load_customers().await,
            Section::Orders => self.load_orders().await,
        }
    }

    /// Fetch the aggregates and update the counters and the connection
    /// indicator.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Api`] if the fetch fails. The indicator is
    /// set to [`ConnectionStatus::Error`] first.
    #[instrument(skip(self))]
    pub async fn load_dashboard(&mut self) -> Result<(), DashboardError> {
        match self.api.dashboard().await {
            Ok(snapshot) => {
                for (counter, text) in render::counters(&snapshot) {
                    self.surface.set_counter(counter, &text);
                }
                self.surface.set_status(ConnectionStatus::Connected);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to load dashboard");
                self.surface.set_status(ConnectionStatus::Error);
                Err(e.into())
            }
        }
    }

    /// Fetch and render the product list.
    ///
    /// # Errors
    ///
    /// Returns the fetch or render error. The previous list stays on the
    /// surface.
    #[instrument(skip(self))]
    pub async fn load_products(&mut self) -> Result<(), DashboardError> {
        let products = self
            .api
            .list_products()
            .await
            .inspect_err(|e| error!(error = %e, "Failed to load products"))?;
        let fragment = render::render_products(&products)
            .inspect_err(|e| error!(error = %e, "Failed to render products"))?;
        self.show(Target::ProductsList, fragment);
        Ok(())
    }

    /// Fetch and render the customer list.
    ///
    /// # Errors
    ///
    /// Returns the fetch or render error. The previous list stays on the
    /// surface.
    #[instrument(skip(self))]
    pub async fn load_customers(&mut self) -> Result<(), DashboardError> {
        let customers = self
            .api
            .list_customers()
            .await
            .inspect_err(|e| error!(error = %e, "Failed to load customers"))?;
        let fragment = render::render_customers(&customers)
            .inspect_err(|e| error!(error = %e, "Failed to render customers"))?;
        self.show(Target::CustomersList, fragment);
        Ok(())
    }

    /// Fetch and render the order list.
    ///
    /// # Errors
    ///
    /// Returns the fetch or render error. The previous list stays on the
    /// surface.
    #[instrument(skip(self))]
    pub async fn load_orders(&mut self) -> Result<(), DashboardError> {
        let orders = self
            .api
            .list_orders()
            .await
            .inspect_err(|e| error!(error = %e, "Failed to load orders"))?;
        let fragment = render::render_orders(&orders)
            .inspect_err(|e| error!(error = %e, "Failed to render orders"))?;
        self.show(Target::OrdersList, fragment);
        Ok(())
    }

    /// Handle a creation form submission.
    ///
    /// # Errors
    ///
    /// Returns the validation or API error after it has been shown.
    pub async fn submit(&mut self, submission: FormSubmission) -> Result<(), DashboardError> {
        match submission {
            FormSubmission::Product(form) => self.submit_product(&form).await,
            FormSubmission::Customer(form) => self.submit_customer(&form).await,
            FormSubmission::Order(form) => self.submit_order(&form).await,
        }
    }

    /// Create a product from the "add product" form.
    ///
    /// # Errors
    ///
    /// Returns the validation or API error after it has been shown. The
    /// form keeps its values.
    #[instrument(skip(self, form))]
    pub async fn submit_product(&mut self, form: &ProductForm) -> Result<(), DashboardError> {
        let body = self.validated(FormKind::Product, form.validate())?;
        match self.api.create_product(&body).await {
            Ok(product) => {
                info!(id = %product.id, name = %product.name, "Product created");
                self.surface.alert("✅ Product added successfully!");
                self.surface.reset_form(FormKind::Product);
                self.reload_with_dashboard(Section::Products).await;
                Ok(())
            }
            Err(e) => Err(self.report_failure(e, "❌ Error adding product")),
        }
    }

    /// Create a customer from the "add customer" form.
    ///
    /// # Errors
    ///
    /// Returns the validation or API error after it has been shown. The
    /// form keeps its values.
    #[instrument(skip(self, form))]
    pub async fn submit_customer(&mut self, form: &CustomerForm) -> Result<(), DashboardError> {
        let body = self.validated(FormKind::Customer, form.validate())?;
        match self.api.create_customer(&body).await {
            Ok(customer) => {
                info!(id = %customer.id, "Customer created");
                self.surface.alert("✅ Customer added successfully!");
                self.surface.reset_form(FormKind::Customer);
                self.reload_with_dashboard(Section::Customers).await;
                Ok(())
            }
            Err(e) => Err(self.report_failure(e, "❌ Error adding customer")),
        }
    }

    /// Create an order from the "create order" form.
    ///
    /// # Errors
    ///
    /// Returns the validation or API error after it has been shown. The
    /// form keeps its values.
    #[instrument(skip(self, form))]
    pub async fn submit_order(&mut self, form: &OrderForm) -> Result<(), DashboardError> {
        let body = self.validated(FormKind::Order, form.validate())?;
        match self.api.create_order(&body).await {
            Ok(order) => {
                info!(id = %order.id, items = order.items.len(), "Order created");
                self.surface.alert("✅ Order created successfully!");
                self.surface.reset_form(FormKind::Order);
                self.reload_with_dashboard(Section::Orders).await;
                Ok(())
            }
            Err(e) => Err(self.report_failure(e, "❌ Error creating order")),
        }
    }

    /// Delete a product after the user confirms.
    ///
    /// # Errors
    ///
    /// Returns the API error after it has been shown.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&mut self, id: &ProductId) -> Result<(), DashboardError> {
        if !self.surface.confirm(CONFIRM_DELETE_PRODUCT) {
            info!("Product deletion cancelled");
            return Ok(());
        }
        match self.api.delete_product(id).await {
            Ok(message) => {
                info!(message = %message, "Product deleted");
                self.surface.alert("✅ Product deleted successfully!");
                self.reload_with_dashboard(Section::Products).await;
                Ok(())
            }
            Err(e) => Err(self.report_failure(e, "❌ Error deleting product")),
        }
    }

    /// Move an order to `status`.
    ///
    /// # Errors
    ///
    /// Returns the API error after it has been shown.
    #[instrument(skip(self), fields(id = %id, status = %status))]
    pub async fn update_order_status(
        &mut self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), DashboardError> {
        match self.api.update_order_status(id, status).await {
            Ok(message) => {
                info!(message = %message, "Order status updated");
                self.surface.alert("✅ Order status updated!");
                self.reload_with_dashboard(Section::Orders).await;
                Ok(())
            }
            Err(e) => Err(self.report_failure(e, "❌ Error updating order")),
        }
    }

    /// Activate the control with id `control_id`.
    ///
    /// Ids that are not bound to anything on the surface are ignored.
    ///
    /// # Errors
    ///
    /// Returns the error of the dispatched action.
    pub async fn click(&mut self, control_id: &str) -> Result<(), DashboardError> {
        let Some((_, action)) = self.controls.get(control_id).cloned() else {
            warn!(control = control_id, "Ignoring unbound control");
            return Ok(());
        };
        self.dispatch(action).await
    }

    /// Run the mutation an action stands for.
    ///
    /// # Errors
    ///
    /// Returns the API error after it has been shown.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), DashboardError> {
        match action {
            Action::DeleteProduct(id) => self.delete_product(&id).await,
            Action::SetOrderStatus { order, status } => {
                self.update_order_status(&order, status).await
            }
        }
    }

    /// Replace `target` and rebind its controls.
    fn show(&mut self, target: Target, fragment: Fragment) {
        self.controls.retain(|_, (bound, _)| *bound != target);
        let count = fragment.controls.len();
        for control in fragment.controls {
            self.controls.insert(control.id, (target, control.action));
        }
        self.surface.replace(target, &fragment.html);
        debug!(target = target.id(), controls = count, "Fragment replaced");
    }

    fn validated<T>(
        &mut self,
        kind: FormKind,
        result: Result<T, FormError>,
    ) -> Result<T, DashboardError> {
        result.map_err(|e| {
            warn!(form = kind.id(), error = %e, "Form rejected");
            self.surface.alert(&e.to_string());
            e.into()
        })
    }

    /// Show a failed mutation. Backend messages are shown verbatim,
    /// transport failures get the generic `fallback`.
    fn report_failure(&mut self, error: ApiError, fallback: &str) -> DashboardError {
        if error.is_application() {
            warn!(error = %error, "Backend rejected request");
            self.surface.alert(&format!("❌ Error: {error}"));
        } else {
            error!(error = %error, "Request failed");
            self.surface.alert(fallback);
        }
        error.into()
    }

    async fn reload_with_dashboard(&mut self, section: Section) {
        // Loaders log and surface their own failures.
        let _ = self.load(section).await;
        let _ = self.load_dashboard().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use trendx_core::PaymentMethod;

    use super::*;
    use crate::api::fake::{FakeApi, sample_order, sample_product};
    use crate::surface::{Counter, MemorySurface};

    fn dashboard(api: FakeApi) -> Dashboard<FakeApi, MemorySurface> {
        Dashboard::new(api, MemorySurface::new())
    }

    fn tee_form() -> ProductForm {
        ProductForm {
            name: "Tee".to_string(),
            category: "Shirts".to_string(),
            price: "19.5".to_string(),
            quantity: "10".to_string(),
            ..ProductForm::default()
        }
    }

    #[tokio::test]
    async fn test_init_shows_dashboard_and_runs_all_loaders() {
        let mut dashboard = dashboard(FakeApi::with_products(vec![sample_product("p1", "Tee")]));
        dashboard.init().await;

        assert_eq!(dashboard.active(), Some(Section::Dashboard));
        assert_eq!(dashboard.surface().visible, Some(Section::Dashboard));
        for method in ["dashboard", "list_products", "list_customers", "list_orders"] {
            assert_eq!(dashboard.api().calls(method), 1, "{method}");
        }
        assert_eq!(dashboard.surface().status, Some(ConnectionStatus::Connected));
        assert_eq!(dashboard.surface().counter(Counter::Products), "1");
        assert_eq!(dashboard.surface().counter(Counter::InventoryValue), "$195");
        assert!(dashboard.surface().fragment(Target::ProductsList).contains("Tee"));
    }

    #[tokio::test]
    async fn test_activate_loads_only_that_section() {
        let mut dashboard = dashboard(FakeApi::default());
        dashboard.activate(Section::Customers).await.unwrap();

        assert_eq!(dashboard.active(), Some(Section::Customers));
        assert_eq!(dashboard.surface().visible, Some(Section::Customers));
        assert_eq!(dashboard.api().calls("list_customers"), 1);
        assert_eq!(dashboard.api().total_calls(), 1);
        assert!(
            dashboard
                .surface()
                .fragment(Target::CustomersList)
                .contains("No customers yet")
        );
    }

    #[tokio::test]
    async fn test_refresh_without_active_section_is_noop() {
        let mut dashboard = dashboard(FakeApi::default());
        dashboard.refresh_active().await.unwrap();
        assert_eq!(dashboard.api().total_calls(), 0);
    }

    #[tokio::test]
    async fn test_dashboard_failure_sets_error_status() {
        let mut dashboard =
            dashboard(FakeApi::failing(ApiError::Request("connection refused".to_string())));
        assert!(dashboard.load_dashboard().await.is_err());
        assert_eq!(dashboard.surface().status, Some(ConnectionStatus::Error));
        assert!(dashboard.surface().alerts.is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_keeps_previous_fragment() {
        let mut dashboard = dashboard(FakeApi::failing(ApiError::Response("bad".to_string())));
        dashboard.surface_mut().replace(Target::OrdersList, "previous");

        assert!(dashboard.load_orders().await.is_err());
        assert_eq!(dashboard.surface().fragment(Target::OrdersList), "previous");
        assert!(dashboard.surface().alerts.is_empty());
    }

    #[tokio::test]
    async fn test_submit_product_success() {
        let mut dashboard = dashboard(FakeApi::default());
        dashboard
            .submit(FormSubmission::Product(tee_form()))
            .await
            .unwrap();

        let surface = dashboard.surface();
        assert_eq!(surface.last_alert(), Some("✅ Product added successfully!"));
        assert_eq!(surface.resets, vec![FormKind::Product]);
        let list = surface.fragment(Target::ProductsList);
        assert!(list.contains("$19.50"));
        assert!(list.contains("10 units"));
        assert_eq!(surface.counter(Counter::Products), "1");
        assert_eq!(dashboard.api().calls("create_product"), 1);
        assert_eq!(dashboard.api().calls("list_products"), 1);
        assert_eq!(dashboard.api().calls("dashboard"), 1);
    }

    #[tokio::test]
    async fn test_blank_required_field_issues_no_request() {
        let mut dashboard = dashboard(FakeApi::default());
        let form = ProductForm {
            category: "  ".to_string(),
            ..tee_form()
        };
        let result = dashboard.submit_product(&form).await;

        assert!(matches!(
            result,
            Err(DashboardError::Form(FormError::MissingRequired))
        ));
        assert_eq!(dashboard.api().total_calls(), 0);
        assert_eq!(
            dashboard.surface().last_alert(),
            Some("Please fill in all required fields")
        );
        assert!(dashboard.surface().resets.is_empty());
    }

    #[tokio::test]
    async fn test_application_error_is_shown_verbatim() {
        let mut dashboard = dashboard(FakeApi::failing(ApiError::Api(
            "Name, category, and price are required".to_string(),
        )));
        assert!(dashboard.submit_product(&tee_form()).await.is_err());

        assert_eq!(
            dashboard.surface().last_alert(),
            Some("❌ Error: Name, category, and price are required")
        );
        assert!(dashboard.surface().resets.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_shows_generic_prompt() {
        let mut dashboard =
            dashboard(FakeApi::failing(ApiError::Request("connection refused".to_string())));
        let form = CustomerForm {
            name: "Emma".to_string(),
            phone: "555".to_string(),
            ..CustomerForm::default()
        };
        assert!(dashboard.submit_customer(&form).await.is_err());
        assert_eq!(
            dashboard.surface().last_alert(),
            Some("❌ Error adding customer")
        );
        assert!(dashboard.surface().resets.is_empty());
    }

    #[tokio::test]
    async fn test_submit_order_splits_items() {
        let mut dashboard = dashboard(FakeApi::default());
        let form = OrderForm {
            customer_name: "Emma".to_string(),
            items: "Shirt\nPants\n\n".to_string(),
            total_price: "42.10".to_string(),
            payment_method: PaymentMethod::Card,
        };
        dashboard.submit_order(&form).await.unwrap();

        let orders = dashboard.api().orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items, vec!["Shirt", "Pants"]);
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert_eq!(
            dashboard.surface().last_alert(),
            Some("✅ Order created successfully!")
        );
        assert!(
            dashboard
                .surface()
                .fragment(Target::OrdersList)
                .contains("Shirt, Pants")
        );
    }

    #[tokio::test]
    async fn test_delete_control_refused() {
        let mut dashboard = dashboard(FakeApi::with_products(vec![sample_product("p1", "Tee")]));
        dashboard.load_products().await.unwrap();
        dashboard.surface_mut().confirm_answer = false;
        dashboard.api().clear_calls();

        dashboard.click("delete-product-p1").await.unwrap();

        assert_eq!(
            dashboard.surface().confirmations,
            vec![CONFIRM_DELETE_PRODUCT.to_string()]
        );
        assert_eq!(dashboard.api().total_calls(), 0);
        assert_eq!(dashboard.api().products().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_control_accepted_unbinds_control() {
        let mut dashboard = dashboard(FakeApi::with_products(vec![
            sample_product("p1", "Tee"),
            sample_product("p2", "Cap"),
        ]));
        dashboard.load_products().await.unwrap();

        dashboard.click("delete-product-p1").await.unwrap();

        let remaining = dashboard.api().products();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id.as_str(), "p2");
        assert_eq!(
            dashboard.surface().last_alert(),
            Some("✅ Product deleted successfully!")
        );
        assert!(!dashboard.is_bound("delete-product-p1"));
        assert!(dashboard.is_bound("delete-product-p2"));

        dashboard.api().clear_calls();
        dashboard.click("delete-product-p1").await.unwrap();
        assert_eq!(dashboard.api().total_calls(), 0);
    }

    #[tokio::test]
    async fn test_complete_order_control() {
        let mut dashboard = dashboard(FakeApi::with_orders(vec![sample_order("o1", "Emma")]));
        dashboard.load_orders().await.unwrap();

        dashboard.click("complete-order-o1").await.unwrap();

        assert_eq!(dashboard.api().orders()[0].status, OrderStatus::Completed);
        assert_eq!(
            dashboard.surface().last_alert(),
            Some("✅ Order status updated!")
        );
        assert!(
            dashboard
                .surface()
                .fragment(Target::OrdersList)
                .contains("order-status completed")
        );
        assert_eq!(dashboard.api().calls("dashboard"), 1);
    }

    #[tokio::test]
    async fn test_missing_order_shows_backend_message() {
        let mut dashboard = dashboard(FakeApi::default());
        let result = dashboard
            .dispatch(Action::SetOrderStatus {
                order: OrderId::new("gone"),
                status: OrderStatus::Completed,
            })
            .await;

        assert!(matches!(result, Err(DashboardError::Api(ApiError::Api(_)))));
        assert_eq!(
            dashboard.surface().last_alert(),
            Some("❌ Error: Order not found")
        );
    }

    #[tokio::test]
    async fn test_reload_rebinds_only_its_target() {
        let mut dashboard = dashboard(FakeApi::with_orders(vec![sample_order("o1", "Emma")]));
        dashboard.load_orders().await.unwrap();
        dashboard.load_products().await.unwrap();

        assert!(dashboard.is_bound("complete-order-o1"));
    }
}
