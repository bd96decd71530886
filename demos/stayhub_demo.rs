use std::sync::Arc;

use stayhub::browse::{BrowseQuery, SortKey};
use stayhub::config::{AppConfig, GuestContact, StorageBackend};
use stayhub::session::{BookingForm, Session};
use stayhub::{Catalog, HotelId};
use time::macros::date;

const HOTELS: &str = r#"[
    {"id":1,"name":"Rixos Almaty","location":"Seifullin Ave 506, Almaty","city":"Almaty","price":85000,"rating":4.9,
     "description":"Luxury hotel in the city centre","amenities":["Spa","Pool","WiFi"],"image":"images/rixos.jpg",
     "rooms":230,"checkInTime":"14:00","checkOutTime":"12:00"},
    {"id":2,"name":"Hotel Kazakhstan","location":"Dostyk Ave 52, Almaty","city":"Almaty","price":32000,"rating":4.3,
     "description":"Landmark tower with mountain views","amenities":["WiFi","Restaurant"],"image":"images/kazakhstan.jpg",
     "rooms":310,"checkInTime":"14:00","checkOutTime":"12:00"},
    {"id":3,"name":"Ritz-Carlton Astana","location":"Dostyk St 16, Astana","city":"Astana","price":95000,"rating":4.8,
     "description":"Five stars on the left bank","amenities":["Spa","Gym","WiFi"],"image":"images/ritz.jpg",
     "rooms":157,"checkInTime":"15:00","checkOutTime":"12:00"}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "stayhub.json".to_string());
    let config = AppConfig::builder()
        .backend(StorageBackend::JsonFile(path.into()))
        .build()?;

    let catalog = Arc::new(Catalog::from_json(HOTELS)?);
    let mut session = Session::open(config, catalog)?;

    // Search form hands the location over to the browse page
    session.search("almaty", date!(2025 - 07 - 10), date!(2025 - 07 - 12), 2)?;
    let view = session.browse_saved();
    println!("{} hotel(s) found in {:?}", view.hotels.len(), view.city);
    for hotel in &view.hotels {
        println!("  {:<24} {:>8} KZT  {:.1}", hotel.name, hotel.price, hotel.rating);
    }

    let cheapest_first = BrowseQuery { sort: SortKey::PriceAsc, ..Default::default() };
    let cheapest = session.browse(&cheapest_first);
    println!("cheapest: {}", cheapest[0].name);

    let now_favorite = session.favorites.toggle(HotelId(3));
    println!("Ritz-Carlton favorite: {now_favorite}");

    if session.add_to_cart(HotelId(2))? {
        println!("added to cart, total {}", session.cart.total());
    } else {
        println!("already in cart");
    }

    let booking = session.book(
        HotelId(1),
        BookingForm {
            check_in: date!(2025 - 08 - 01),
            check_out: date!(2025 - 08 - 04),
            guests: 2,
            contact: GuestContact {
                name: "Aida Nurlanovna".into(),
                email: "aida@example.kz".into(),
                phone: "+7 (701) 123-4567".into(),
            },
        },
    )?;
    println!("booking {} for {} nights: {}", booking.id, booking.details.nights, booking.details.total_price);

    let checked_out = session.checkout(date!(2025 - 07 - 01))?;
    println!("checkout created {} booking(s)", checked_out.len());

    for b in session.bookings.list() {
        println!("  #{} {} {:?}", b.id, b.details.hotel.name, b.status);
    }

    Ok(())
}
