use super::html::{escape, layout, Page};
use crate::modules::{
    category::repository::Category, menu_item::repository::MenuItem,
    restaurant::repository::{Restaurant, RestaurantWithLocation},
};

fn restaurant_card(restaurant: &Restaurant) -> String {
    let cover = restaurant
        .cover_image
        .as_ref()
        .map(|image| {
            format!(
                r#"<img src="{}" alt="" loading="lazy">"#,
                escape(&image.0.url)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<li class="card">
  <a href="/restaurants/{id}">
    {cover}
    <h3>{name}</h3>
    <p>{address}</p>
    <p class="muted">{opening} to {closing}</p>
  </a>
</li>"#,
        id = escape(&restaurant.id),
        cover = cover,
        name = escape(&restaurant.name),
        address = escape(&restaurant.address),
        opening = escape(&restaurant.opening_time),
        closing = escape(&restaurant.closing_time),
    )
}

pub fn home(restaurants: &[Restaurant]) -> String {
    let list = if restaurants.is_empty() {
        String::from(r#"<p class="muted">No restaurants are open right now.</p>"#)
    } else {
        restaurants
            .iter()
            .map(restaurant_card)
            .collect::<Vec<_>>()
            .join("\n")
    };

    layout(Page {
        title: "Restaurants",
        name: "home",
        head: "",
        body: format!(
            r#"<section>
  <div class="row">
    <h1>Open restaurants</h1>
    <button type="button" id="near-me">Near me</button>
  </div>
  <ul class="cards" id="restaurants">
{list}
  </ul>
</section>"#
        ),
    })
}

fn menu_item_row(menu_item: &MenuItem) -> String {
    let image = menu_item
        .image
        .as_ref()
        .map(|image| {
            format!(
                r#"<img src="{}" alt="" loading="lazy">"#,
                escape(&image.0.url)
            )
        })
        .unwrap_or_default();

    let action = if menu_item.is_available {
        format!(
            r#"<button type="button" class="add-to-cart" data-id="{id}" data-name="{name}" data-price="{price}">Add</button>"#,
            id = escape(&menu_item.id),
            name = escape(&menu_item.name),
            price = escape(&menu_item.price.to_string()),
        )
    } else {
        String::from(r#"<span class="muted">Unavailable</span>"#)
    };

    format!(
        r#"<li class="menu-item">
  {image}
  <div>
    <h4>{name}</h4>
    <p>{description}</p>
    <strong>{price}</strong>
  </div>
  {action}
</li>"#,
        image = image,
        name = escape(&menu_item.name),
        description = escape(&menu_item.description),
        price = escape(&menu_item.price.to_string()),
        action = action,
    )
}

fn menu_section(title: &str, menu_items: &[&MenuItem]) -> String {
    format!(
        r#"<section class="menu-section">
  <h2>{title}</h2>
  <ul>
{items}
  </ul>
</section>"#,
        title = escape(title),
        items = menu_items
            .iter()
            .map(|menu_item| menu_item_row(menu_item))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Menu items grouped under their categories, uncategorised items last.
pub fn group_menu<'a>(
    categories: &'a [Category],
    menu_items: &'a [MenuItem],
) -> Vec<(&'a str, Vec<&'a MenuItem>)> {
    let mut groups = categories
        .iter()
        .map(|category| {
            let items = menu_items
                .iter()
                .filter(|menu_item| menu_item.category_id.as_deref() == Some(category.id.as_str()))
                .collect::<Vec<_>>();
            (category.name.as_str(), items)
        })
        .filter(|(_, items)| !items.is_empty())
        .collect::<Vec<_>>();

    let uncategorised = menu_items
        .iter()
        .filter(|menu_item| {
            menu_item
                .category_id
                .as_ref()
                .map_or(true, |id| !categories.iter().any(|category| &category.id == id))
        })
        .collect::<Vec<_>>();

    if !uncategorised.is_empty() {
        groups.push(("Other", uncategorised));
    }

    groups
}

pub fn restaurant(
    restaurant: &RestaurantWithLocation,
    categories: &[Category],
    menu_items: &[MenuItem],
    publishable_key: &str,
) -> String {
    let sections = group_menu(categories, menu_items)
        .into_iter()
        .map(|(title, items)| menu_section(title, &items))
        .collect::<Vec<_>>()
        .join("\n");

    let status = if restaurant.restaurant.is_open {
        r#"<span class="badge open">Open</span>"#
    } else {
        r#"<span class="badge closed">Closed</span>"#
    };

    layout(Page {
        title: &restaurant.restaurant.name,
        name: "restaurant",
        head: r#"<script src="https://js.stripe.com/v3/"></script>"#,
        body: format!(
            r#"<section class="restaurant" data-restaurant-id="{id}" data-publishable-key="{key}">
  <h1>{name} {status}</h1>
  <p>{description}</p>
  <p class="muted">{address} · {phone}</p>
</section>
<div class="split">
  <div class="menu">
{sections}
  </div>
  <aside class="cart">
    <h2>Your order</h2>
    <ul id="cart-lines"></ul>
    <p>Sub-total: <strong id="cart-total">0.00</strong></p>
    <form id="checkout">
      <label>Delivery address <input name="delivery_address" required></label>
      <label><input type="checkbox" name="use_location"> Use my current location</label>
      <button type="submit">Place order</button>
    </form>
    <div id="payment" hidden>
      <div id="payment-element"></div>
      <button type="button" id="pay">Pay</button>
    </div>
    <p id="checkout-message" class="message"></p>
  </aside>
</div>"#,
            id = escape(&restaurant.restaurant.id),
            key = escape(publishable_key),
            name = escape(&restaurant.restaurant.name),
            status = status,
            description = escape(&restaurant.restaurant.description),
            address = escape(&restaurant.restaurant.address),
            phone = escape(&restaurant.restaurant.phone_number),
            sections = sections,
        ),
    })
}

pub fn sign_in() -> String {
    layout(Page {
        title: "Sign in",
        name: "sign-in",
        head: "",
        body: String::from(
            r#"<section class="narrow">
  <h1>Sign in</h1>
  <form id="sign-in-form">
    <label>Email <input type="email" name="email" required></label>
    <label>Password <input type="password" name="password" required></label>
    <button type="submit">Sign in</button>
  </form>
  <a class="button secondary" href="/api/auth/google">Continue with Google</a>
  <p id="form-message" class="message"></p>
</section>"#,
        ),
    })
}

pub fn sign_up() -> String {
    layout(Page {
        title: "Sign up",
        name: "sign-up",
        head: "",
        body: String::from(
            r#"<section class="narrow">
  <h1>Create an account</h1>
  <form id="sign-up-form">
    <label>First name <input name="first_name" required></label>
    <label>Last name <input name="last_name" required></label>
    <label>Email <input type="email" name="email" required></label>
    <label>Password <input type="password" name="password" minlength="8" required></label>
    <label>I am a
      <select name="role">
        <option value="CUSTOMER">Customer</option>
        <option value="RESTAURANT_OWNER">Restaurant owner</option>
        <option value="DRIVER">Driver</option>
      </select>
    </label>
    <button type="submit">Sign up</button>
  </form>
  <p id="form-message" class="message"></p>
</section>"#,
        ),
    })
}

pub fn auth_complete() -> String {
    layout(Page {
        title: "Signing you in",
        name: "auth-complete",
        head: "",
        body: String::from(r#"<p id="form-message" class="message">Signing you in…</p>"#),
    })
}

pub fn customer_dashboard() -> String {
    layout(Page {
        title: "My orders",
        name: "dashboard-customer",
        head: "",
        body: String::from(
            r#"<section>
  <h1>My orders</h1>
  <form id="location-form" class="inline">
    <label>Default address <input name="address" required></label>
    <button type="submit">Save with my current location</button>
  </form>
  <ul id="orders" class="orders"></ul>
</section>"#,
        ),
    })
}

pub fn restaurant_dashboard() -> String {
    layout(Page {
        title: "My restaurants",
        name: "dashboard-restaurant",
        head: "",
        body: String::from(
            r#"<section>
  <h1>My restaurants</h1>
  <ul id="my-restaurants" class="cards"></ul>
  <details>
    <summary>Add a restaurant</summary>
    <form id="restaurant-form">
      <label>Name <input name="name" required></label>
      <label>Description <textarea name="description"></textarea></label>
      <label>Address <input name="address" required></label>
      <label>Phone number <input name="phone_number" placeholder="+15551234567" required></label>
      <label>Opens <input name="opening_time" placeholder="08:00" required></label>
      <label>Closes <input name="closing_time" placeholder="22:00" required></label>
      <button type="submit">Create</button>
    </form>
  </details>
</section>
<section>
  <h2>Incoming orders</h2>
  <ul id="orders" class="orders"></ul>
</section>
<p id="form-message" class="message"></p>"#,
        ),
    })
}

pub fn driver_dashboard() -> String {
    layout(Page {
        title: "Deliveries",
        name: "dashboard-driver",
        head: "",
        body: String::from(
            r#"<section id="driver-register" hidden>
  <h1>Register as a driver</h1>
  <form id="driver-form">
    <label>Vehicle type <input name="vehicle_type" required></label>
    <label>License plate <input name="license_plate" required></label>
    <button type="submit">Register</button>
  </form>
</section>
<section id="driver-panel" hidden>
  <div class="row">
    <h1>Deliveries</h1>
    <label><input type="checkbox" id="availability"> Available</label>
  </div>
  <p id="last-ping" class="muted"></p>
  <h2>Assigned to me</h2>
  <ul id="assigned-orders" class="orders"></ul>
  <h2>Waiting for a driver nearby</h2>
  <ul id="available-orders" class="orders"></ul>
</section>
<p id="form-message" class="message"></p>"#,
        ),
    })
}

pub fn not_found(what: &str) -> String {
    layout(Page {
        title: "Not found",
        name: "not-found",
        head: "",
        body: format!(
            r#"<section class="narrow"><h1>{} not found</h1><a href="/">Back to restaurants</a></section>"#,
            escape(what)
        ),
    })
}

pub fn error() -> String {
    layout(Page {
        title: "Something went wrong",
        name: "error",
        head: "",
        body: String::from(
            r#"<section class="narrow"><h1>Something went wrong</h1><p>Please try again in a moment.</p></section>"#,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDateTime;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            restaurant_id: String::from("r1"),
            created_at: NaiveDateTime::default(),
            updated_at: None,
        }
    }

    fn menu_item(id: &str, name: &str, category_id: Option<&str>) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: BigDecimal::from(4),
            image: None,
            is_available: true,
            restaurant_id: String::from("r1"),
            category_id: category_id.map(String::from),
            created_at: NaiveDateTime::default(),
            updated_at: None,
        }
    }

    fn restaurant(name: &str) -> Restaurant {
        Restaurant {
            id: String::from("r1"),
            name: name.to_string(),
            description: String::new(),
            address: String::from("1 Marina Road"),
            phone_number: String::from("+2348000000000"),
            opening_time: String::from("08:00"),
            closing_time: String::from("22:00"),
            is_open: true,
            cover_image: None,
            owner_id: String::from("o1"),
            created_at: NaiveDateTime::default(),
            updated_at: None,
        }
    }

    #[test]
    fn menu_is_grouped_by_category_with_leftovers_last() {
        let categories = vec![category("c1", "Mains"), category("c2", "Drinks")];
        let menu_items = vec![
            menu_item("m1", "Jollof", Some("c1")),
            menu_item("m2", "Zobo", Some("c2")),
            menu_item("m3", "Chin chin", None),
        ];

        let groups = group_menu(&categories, &menu_items)
            .into_iter()
            .map(|(title, items)| {
                (
                    title,
                    items.iter().map(|item| item.id.as_str()).collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>();

        assert_eq!(
            groups,
            vec![
                ("Mains", vec!["m1"]),
                ("Drinks", vec!["m2"]),
                ("Other", vec!["m3"])
            ]
        );
    }

    #[test]
    fn empty_categories_are_skipped() {
        let categories = vec![category("c1", "Desserts")];
        let menu_items = vec![menu_item("m1", "Suya", None)];
        let groups = group_menu(&categories, &menu_items);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "Other");
    }

    #[test]
    fn home_escapes_restaurant_names() {
        let html = home(&[restaurant("<img src=x onerror=alert(1)>")]);
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img src=x"));
    }

    #[test]
    fn home_says_when_nothing_is_open() {
        assert!(home(&[]).contains("No restaurants are open right now."));
    }
}
