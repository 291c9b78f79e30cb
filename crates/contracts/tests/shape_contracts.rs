//! Cross-entity contract properties.
//!
//! Every entity module must uphold the same shape conventions: an empty
//! filter payload is always valid, an update carrying only the identifier
//! is a valid no-op, and a create payload missing one required field fails
//! citing exactly that field.

use rentora_core::error::ValidationError;
use serde_json::{json, Value};

use rentora_contracts::*;

type Check = fn(&Value) -> Result<(), ValidationError>;

fn ok<T>(result: Result<T, ValidationError>) -> Result<(), ValidationError> {
    result.map(|_| ())
}

// ---------------------------------------------------------------------------
// Per-entity validate_filter / validate_update entry points
// ---------------------------------------------------------------------------

fn filter_checks() -> Vec<(&'static str, Check)> {
    vec![
        ("agent", |v| ok(agent::validate_filter(v))),
        ("agency", |v| ok(agency::validate_filter(v))),
        ("availability", |v| ok(availability::validate_filter(v))),
        ("channel", |v| ok(channel::validate_filter(v))),
        ("commission_rule", |v| ok(commission_rule::validate_filter(v))),
        ("communication", |v| ok(communication::validate_filter(v))),
        ("compliance_record", |v| {
            ok(compliance_record::validate_filter(v))
        }),
        ("contract", |v| ok(contract::validate_filter(v))),
        ("currency", |v| ok(currency::validate_filter(v))),
        ("discount", |v| ok(discount::validate_filter(v))),
        ("event", |v| ok(event::validate_filter(v))),
        ("expense", |v| ok(expense::validate_filter(v))),
        ("extra_charge", |v| ok(extra_charge::validate_filter(v))),
        ("facility", |v| ok(facility::validate_filter(v))),
        ("guest", |v| ok(guest::validate_filter(v))),
        ("hashtag", |v| ok(hashtag::validate_filter(v))),
        ("included_service", |v| {
            ok(included_service::validate_filter(v))
        }),
        ("increase", |v| ok(increase::validate_filter(v))),
        ("language", |v| ok(language::validate_filter(v))),
        ("location", |v| ok(location::validate_filter(v))),
        ("mention", |v| ok(mention::validate_filter(v))),
        ("mortgage", |v| ok(mortgage::validate_filter(v))),
        ("offer", |v| ok(offer::validate_filter(v))),
        ("payment", |v| ok(payment::validate_filter(v))),
        ("payment_provider", |v| {
            ok(payment_provider::validate_filter(v))
        }),
        ("photo", |v| ok(photo::validate_filter(v))),
        ("pricing_rule", |v| ok(pricing_rule::validate_filter(v))),
        ("property", |v| ok(property::validate_filter(v))),
        ("provider", |v| ok(provider::validate_filter(v))),
        ("reservation", |v| ok(reservation::validate_filter(v))),
        ("review", |v| ok(review::validate_filter(v))),
        ("task", |v| ok(task::validate_filter(v))),
        ("tax_record", |v| ok(tax_record::validate_filter(v))),
        ("ticket", |v| ok(ticket::validate_filter(v))),
    ]
}

fn update_checks() -> Vec<(&'static str, Check)> {
    vec![
        ("agent", |v| ok(agent::validate_update(v))),
        ("agency", |v| ok(agency::validate_update(v))),
        ("availability", |v| ok(availability::validate_update(v))),
        ("channel", |v| ok(channel::validate_update(v))),
        ("commission_rule", |v| ok(commission_rule::validate_update(v))),
        ("communication", |v| ok(communication::validate_update(v))),
        ("compliance_record", |v| {
            ok(compliance_record::validate_update(v))
        }),
        ("contract", |v| ok(contract::validate_update(v))),
        ("currency", |v| ok(currency::validate_update(v))),
        ("discount", |v| ok(discount::validate_update(v))),
        ("event", |v| ok(event::validate_update(v))),
        ("expense", |v| ok(expense::validate_update(v))),
        ("extra_charge", |v| ok(extra_charge::validate_update(v))),
        ("facility", |v| ok(facility::validate_update(v))),
        ("guest", |v| ok(guest::validate_update(v))),
        ("hashtag", |v| ok(hashtag::validate_update(v))),
        ("included_service", |v| {
            ok(included_service::validate_update(v))
        }),
        ("increase", |v| ok(increase::validate_update(v))),
        ("language", |v| ok(language::validate_update(v))),
        ("location", |v| ok(location::validate_update(v))),
        ("mention", |v| ok(mention::validate_update(v))),
        ("mortgage", |v| ok(mortgage::validate_update(v))),
        ("offer", |v| ok(offer::validate_update(v))),
        ("payment", |v| ok(payment::validate_update(v))),
        ("payment_provider", |v| {
            ok(payment_provider::validate_update(v))
        }),
        ("photo", |v| ok(photo::validate_update(v))),
        ("pricing_rule", |v| ok(pricing_rule::validate_update(v))),
        ("property", |v| ok(property::validate_update(v))),
        ("provider", |v| ok(provider::validate_update(v))),
        ("reservation", |v| ok(reservation::validate_update(v))),
        ("review", |v| ok(review::validate_update(v))),
        ("task", |v| ok(task::validate_update(v))),
        ("tax_record", |v| ok(tax_record::validate_update(v))),
        ("ticket", |v| ok(ticket::validate_update(v))),
    ]
}

/// Minimal valid create payload plus the shape-level required fields.
fn create_cases() -> Vec<(&'static str, Value, &'static [&'static str], Check)> {
    vec![
        (
            "agent",
            json!({"name": "Jane Doe"}),
            &["name"],
            |v| ok(agent::validate_create(v)),
        ),
        (
            "agency",
            json!({"name": "Coastal Homes"}),
            &["name"],
            |v| ok(agency::validate_create(v)),
        ),
        (
            "availability",
            json!({"propertyId": "p1", "date": "2024-07-01T00:00:00Z"}),
            &["propertyId", "date"],
            |v| ok(availability::validate_create(v)),
        ),
        (
            "channel",
            json!({"name": "general"}),
            &["name"],
            |v| ok(channel::validate_create(v)),
        ),
        (
            "commission_rule",
            json!({"name": "Standard split", "ruleType": "PERCENTAGE", "commission": 12.5}),
            &["name", "ruleType", "commission"],
            |v| ok(commission_rule::validate_create(v)),
        ),
        (
            "communication",
            json!({"senderId": "u1", "receiverId": "u2", "communicationType": "CHAT", "content": "hi"}),
            &["senderId", "receiverId", "communicationType", "content"],
            |v| ok(communication::validate_create(v)),
        ),
        (
            "compliance_record",
            json!({"propertyId": "p1", "complianceType": "LICENSE"}),
            &["propertyId", "complianceType"],
            |v| ok(compliance_record::validate_create(v)),
        ),
        (
            "contract",
            json!({
                "title": "12-month lease",
                "propertyId": "p1",
                "guestId": "g1",
                "startDate": "2024-06-01T00:00:00Z",
                "endDate": "2025-06-01T00:00:00Z",
                "rentAmount": 1500.0,
                "currencyId": "cur_eur",
            }),
            &["title", "propertyId", "guestId", "startDate", "endDate", "rentAmount", "currencyId"],
            |v| ok(contract::validate_create(v)),
        ),
        (
            "currency",
            json!({"code": "EUR", "name": "Euro", "symbol": "€"}),
            &["code", "name", "symbol"],
            |v| ok(currency::validate_create(v)),
        ),
        (
            "discount",
            json!({"code": "SUMMER24", "discountType": "PERCENTAGE", "value": 10.0}),
            &["code", "discountType", "value"],
            |v| ok(discount::validate_create(v)),
        ),
        (
            "event",
            json!({"title": "Viewing", "eventType": "VIEWING", "scheduledAt": "2024-06-01T14:00:00Z"}),
            &["title", "eventType", "scheduledAt"],
            |v| ok(event::validate_create(v)),
        ),
        (
            "expense",
            json!({"expenseType": "CLEANING", "amount": 85.0, "currencyId": "cur_eur"}),
            &["expenseType", "amount", "currencyId"],
            |v| ok(expense::validate_create(v)),
        ),
        (
            "extra_charge",
            json!({"name": "Late checkout", "amount": 30.0}),
            &["name", "amount"],
            |v| ok(extra_charge::validate_create(v)),
        ),
        (
            "facility",
            json!({"name": "Tower A"}),
            &["name"],
            |v| ok(facility::validate_create(v)),
        ),
        (
            "guest",
            json!({"firstName": "Maya", "lastName": "Costa"}),
            &["firstName", "lastName"],
            |v| ok(guest::validate_create(v)),
        ),
        (
            "hashtag",
            json!({"name": "#seaview"}),
            &["name"],
            |v| ok(hashtag::validate_create(v)),
        ),
        (
            "included_service",
            json!({"name": "Wifi", "serviceType": "WIFI"}),
            &["name", "serviceType"],
            |v| ok(included_service::validate_create(v)),
        ),
        (
            "increase",
            json!({"propertyId": "p1", "amount": 50.0, "effectiveDate": "2024-09-01T00:00:00Z"}),
            &["propertyId", "effectiveDate"],
            |v| ok(increase::validate_create(v)),
        ),
        (
            "language",
            json!({"code": "en", "name": "English"}),
            &["code", "name"],
            |v| ok(language::validate_create(v)),
        ),
        (
            "location",
            json!({"address": "1 Harbour Way", "city": "Lisbon", "country": "Portugal"}),
            &["address", "city", "country"],
            |v| ok(location::validate_create(v)),
        ),
        (
            "mention",
            json!({"entityType": "PROPERTY", "entityId": "p1"}),
            &["entityType", "entityId"],
            |v| ok(mention::validate_create(v)),
        ),
        (
            "mortgage",
            json!({
                "propertyId": "p1",
                "lender": "First National",
                "principal": 250000.0,
                "interestRate": 3.4,
                "termMonths": 360,
                "startDate": "2024-01-01T00:00:00Z",
            }),
            &["propertyId", "lender", "principal", "interestRate", "termMonths", "startDate"],
            |v| ok(mortgage::validate_create(v)),
        ),
        (
            "offer",
            json!({"propertyId": "p1", "guestId": "g1", "amount": 900.0, "currencyId": "cur_eur"}),
            &["propertyId", "guestId", "amount", "currencyId"],
            |v| ok(offer::validate_create(v)),
        ),
        (
            "payment",
            json!({"amount": 1200.0, "currencyId": "cur_eur"}),
            &["amount", "currencyId"],
            |v| ok(payment::validate_create(v)),
        ),
        (
            "payment_provider",
            json!({"name": "Stripe", "code": "stripe", "providerType": "CARD"}),
            &["name", "code", "providerType"],
            |v| ok(payment_provider::validate_create(v)),
        ),
        (
            "photo",
            json!({"url": "https://cdn.example.com/p/1.jpg"}),
            &["url"],
            |v| ok(photo::validate_create(v)),
        ),
        (
            "pricing_rule",
            json!({
                "propertyId": "p1",
                "name": "Peak season",
                "ruleType": "SEASONAL",
                "adjustmentType": "PERCENTAGE",
                "value": 20.0,
            }),
            &["propertyId", "name", "ruleType", "adjustmentType", "value"],
            |v| ok(pricing_rule::validate_create(v)),
        ),
        (
            "property",
            json!({
                "title": "Sunny two-bedroom",
                "propertyType": "APARTMENT",
                "category": "RESIDENTIAL",
                "size": 74.5,
            }),
            &["title", "propertyType", "category", "size"],
            |v| ok(property::validate_create(v)),
        ),
        (
            "provider",
            json!({"name": "Sparkle Cleaning", "serviceType": "CLEANING"}),
            &["name", "serviceType"],
            |v| ok(provider::validate_create(v)),
        ),
        (
            "reservation",
            json!({
                "propertyId": "p1",
                "guestId": "g1",
                "startDate": "2024-06-01T14:00:00Z",
                "endDate": "2024-06-08T10:00:00Z",
                "totalPrice": 980.0,
                "currencyId": "cur_eur",
            }),
            &["propertyId", "guestId", "startDate", "endDate", "totalPrice", "currencyId"],
            |v| ok(reservation::validate_create(v)),
        ),
        (
            "review",
            json!({"propertyId": "p1", "guestId": "g1", "rating": 4}),
            &["propertyId", "guestId", "rating"],
            |v| ok(review::validate_create(v)),
        ),
        (
            "task",
            json!({"title": "Replace boiler filter"}),
            &["title"],
            |v| ok(task::validate_create(v)),
        ),
        (
            "tax_record",
            json!({
                "propertyId": "p1",
                "year": 2024,
                "amount": 1800.0,
                "dueDate": "2024-04-30T00:00:00Z",
            }),
            &["propertyId", "year", "amount", "dueDate"],
            |v| ok(tax_record::validate_create(v)),
        ),
        (
            "ticket",
            json!({"subject": "Heating not working", "userId": "u1"}),
            &["subject", "userId"],
            |v| ok(ticket::validate_create(v)),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn empty_filter_payload_succeeds_for_every_entity() {
    for (name, check) in filter_checks() {
        assert!(
            check(&json!({})).is_ok(),
            "{name}: empty filter should validate"
        );
    }
}

#[test]
fn filters_deny_unknown_fields() {
    for (name, check) in filter_checks() {
        let err = check(&json!({"definitelyNotAField": 1})).unwrap_err();
        assert!(
            err.has_field("definitelyNotAField"),
            "{name}: unknown filter field should be rejected"
        );
    }
}

#[test]
fn update_with_only_id_is_a_valid_noop_for_every_entity() {
    for (name, check) in update_checks() {
        assert!(
            check(&json!({"id": "x1"})).is_ok(),
            "{name}: id-only update should validate"
        );
    }
}

#[test]
fn update_without_id_fails_for_every_entity() {
    for (name, check) in update_checks() {
        let err = check(&json!({})).unwrap_err();
        assert_eq!(
            err.fields(),
            vec!["id"],
            "{name}: missing id should be the only violation"
        );
    }
}

#[test]
fn minimal_create_payload_succeeds_for_every_entity() {
    for (name, payload, _, check) in create_cases() {
        assert!(
            check(&payload).is_ok(),
            "{name}: minimal create should validate: {:?}",
            check(&payload)
        );
    }
}

#[test]
fn removing_any_required_field_cites_exactly_that_field() {
    for (name, payload, required, check) in create_cases() {
        for field in required {
            let mut trimmed = payload.clone();
            trimmed
                .as_object_mut()
                .expect("payload is an object")
                .remove(*field);
            let err = check(&trimmed).unwrap_err();
            assert_eq!(
                err.fields(),
                vec![*field],
                "{name}: removing {field} should cite exactly that field"
            );
        }
    }
}

#[test]
fn create_payloads_reject_server_populated_fields() {
    for (name, payload, _, check) in create_cases() {
        let mut extended = payload.clone();
        let map = extended.as_object_mut().expect("payload is an object");
        map.insert("id".to_string(), json!("x1"));
        map.insert("createdAt".to_string(), json!("2024-01-01T00:00:00Z"));
        map.insert("updatedAt".to_string(), json!("2024-01-01T00:00:00Z"));
        let err = check(&extended).unwrap_err();
        for field in ["id", "createdAt", "updatedAt"] {
            assert!(
                err.has_field(field),
                "{name}: server-populated {field} should be rejected on create"
            );
        }
    }
}

#[test]
fn pagination_bounds_apply_to_every_filter() {
    for (name, check) in filter_checks() {
        let err = check(&json!({"pageSize": 500})).unwrap_err();
        assert_eq!(
            err.fields(),
            vec!["pageSize"],
            "{name}: pageSize over 100 should fail"
        );
        let err = check(&json!({"page": 0})).unwrap_err();
        assert_eq!(err.fields(), vec!["page"], "{name}: page 0 should fail");
    }
}
