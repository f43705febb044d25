//! English (United States) messages.

pub(super) const MESSAGES: &[(&str, &str)] = &[
    // Navigation
    ("cart", "Cart"),
    ("checkout", "Checkout"),
    ("collections", "Collections"),
    ("no-collections-found", "No collections found"),
    ("go-home", "Go home"),
    ("continue-shopping", "Continue shopping"),
    // Auth
    ("sign-in", "Sign in"),
    ("register", "Register"),
    ("logout", "Log out"),
    ("invalid-credentials", "Invalid credentials. Please try again."),
    ("registration-failed", "Registration failed. Please try again."),
    ("invalid-email-address", "Invalid email address"),
    (
        "password-must-be-at-least-n-characters",
        "Password must be at least { $n } characters",
    ),
    // Checkout steps
    ("address", "Address"),
    ("delivery", "Delivery"),
    ("payment", "Payment"),
    ("review", "Review"),
    ("shipping-address", "Shipping Address"),
    ("billing-address", "Billing Address"),
    ("use-same-address-for-billing", "Use same address for billing"),
    ("continue-to-delivery", "Continue to Delivery"),
    ("continue-to-payment", "Continue to Payment"),
    ("review-order", "Review Order"),
    ("pay-using-provider", "Pay using { $provider }"),
    ("place-order", "Place Order"),
    ("continue", "Continue"),
    ("select-shipping-method", "Select Shipping Method"),
    ("select-payment-method", "Select Payment Method"),
    ("shipping-method", "Shipping Method"),
    ("payment-method", "Payment Method"),
    (
        "no-additional-actions-required-for-manual-payment",
        "No additional actions required for manual payment.",
    ),
    (
        "payment-provider-is-in-development",
        "Payment provider { $provider } is in development.",
    ),
    ("stripe-payment-coming-soon", "Stripe payment interface coming soon!"),
    // Checkout errors
    ("error", "Error"),
    ("an-error-occurred", "An error occurred"),
    ("please-select-a-payment-method", "Please select a payment provider"),
    ("no-cart-found", "No cart found"),
    ("no-cart-id", "No cart ID"),
    ("no-region-id", "No region ID"),
    ("cart-is-empty", "Your cart is empty"),
    ("no-shipping-method-selected", "No shipping method selected"),
    ("no-payment-method-selected", "No payment method selected"),
    ("payment-provider-not-supported", "Payment provider not supported"),
    ("failed-to-complete-order", "Failed to complete order"),
    ("failed-to-update-shipping-method", "Failed to update shipping method"),
    ("operation-in-progress", "Please wait for the current action to finish"),
    // Field validation
    ("first-name-is-required", "First name is required"),
    ("last-name-is-required", "Last name is required"),
    ("address-is-required", "Address is required"),
    ("postal-code-is-required", "Postal code is required"),
    ("city-is-required", "City is required"),
    ("country-is-required", "Country is required"),
    ("phone-is-required", "Phone is required"),
    ("please-enter-a-valid-email", "Please enter a valid email"),
    // Orders
    ("order-with-id", "Order # { $id }"),
    ("order-details", "Order Details"),
    ("order-not-found", "Order not found"),
    ("placed-on", "Placed on { $datetime }"),
    ("status", "Status"),
    ("order-items", "Order Items"),
    ("order-summary", "Order Summary"),
    ("count-items", "{ $count } items"),
    ("canceled", "Canceled"),
    ("not-fulfilled", "Not Fulfilled"),
    ("partially-fulfilled", "Partially Fulfilled"),
    ("fulfilled", "Fulfilled"),
    ("partially-shipped", "Partially Shipped"),
    ("shipped", "Shipped"),
    ("partially-delivered", "Partially Delivered"),
    ("delivered", "Delivered"),
    // Summary
    ("subtotal", "Subtotal"),
    ("discount", "Discount"),
    ("shipping", "Shipping"),
    ("taxes", "Taxes"),
    ("total", "Total"),
    ("qty", "Qty"),
    // Product
    ("product-information", "Product Information"),
    ("material", "Material"),
    ("country-of-origin", "Country of origin"),
    ("weight", "Weight"),
    ("dimensions", "Dimensions"),
    ("variant", "Variant"),
    ("add-to-cart", "Add to cart"),
    ("out-of-stock", "Out of stock"),
];
