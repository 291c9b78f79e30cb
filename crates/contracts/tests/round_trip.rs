//! Canonical round-trip: validating an already-valid record, serializing
//! it, and validating again must produce the identical record.

use serde_json::json;

use rentora_contracts::{agent, property, reservation};

#[test]
fn agent_canonical_round_trip_is_idempotent() {
    let payload = json!({
        "id": "a1",
        "name": "Jane Doe",
        "email": "jane@example.com",
        "status": "ACTIVE",
        "commissionRate": 12.5,
        "isActive": true,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-03-01T09:30:00Z",
    });

    let first = agent::validate_canonical(&payload).unwrap();
    let serialized = serde_json::to_value(&first).unwrap();
    let second = agent::validate_canonical(&serialized).unwrap();
    assert_eq!(first, second);
}

#[test]
fn reservation_canonical_round_trip_is_idempotent() {
    let payload = json!({
        "id": "r1",
        "propertyId": "p1",
        "guestId": "g1",
        "startDate": "2024-06-01T14:00:00Z",
        "endDate": "2024-06-08T10:00:00Z",
        "guests": 2,
        "status": "CONFIRMED",
        "totalPrice": 980.0,
        "currencyId": "cur_eur",
        "paymentStatus": "PAID",
        "createdAt": "2024-05-20T08:00:00Z",
        "updatedAt": "2024-05-21T08:00:00Z",
    });

    let first = reservation::validate_canonical(&payload).unwrap();
    let serialized = serde_json::to_value(&first).unwrap();
    let second = reservation::validate_canonical(&serialized).unwrap();
    assert_eq!(first, second);
}

#[test]
fn property_round_trip_preserves_embedded_expansions() {
    let payload = json!({
        "id": "p1",
        "title": "Sunny two-bedroom near the harbour",
        "propertyType": "APARTMENT",
        "propertyStatus": "AVAILABLE",
        "category": "RESIDENTIAL",
        "size": 74.5,
        "features": ["BALCONY", "SEA_VIEW"],
        "amenities": ["POOL", "WIFI"],
        "mortgageEligible": false,
        "locationId": "loc1",
        "location": {
            "id": "loc1",
            "address": "1 Harbour Way",
            "city": "Lisbon",
            "country": "Portugal",
            "latitude": 38.7,
            "longitude": -9.1,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
        },
        "photos": [{
            "id": "ph1",
            "url": "https://cdn.example.com/p/1.jpg",
            "isCover": true,
            "sortIndex": 0,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
        }],
        "isActive": true,
        "featured": false,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z",
    });

    let first = property::validate_canonical(&payload).unwrap();
    let serialized = serde_json::to_value(&first).unwrap();
    let second = property::validate_canonical(&serialized).unwrap();
    assert_eq!(first, second);
    let location = second.location.as_ref().unwrap();
    assert_eq!(location.city, "Lisbon");
    assert_eq!(second.photos.as_ref().unwrap().len(), 1);
}
