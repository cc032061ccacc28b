use shared::{Payment, PaymentPayload};

super::service!(PaymentService, Payment, PaymentPayload, "payments/");
