use super::prelude::*;

/// Select all items of a trip, preserving their order.
pub fn filter_by_trip<'a, T, I>(items: I, trip_id: TripId) -> Vec<T>
where
    T: TripItem + Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .filter(|item| item.trip_id() == trip_id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ausflug_entities::builders::*;

    #[test]
    fn keep_order_of_selected_items() {
        let places = vec![
            Place::build().trip(1).name("Levante").finish(),
            Place::build().trip(2).name("Kesselhaus").finish(),
            Place::build().trip(1).name("MERAKI").finish(),
            Place::build().trip(3).name("Lagerhaus").finish(),
            Place::build().trip(1).name("Safran").finish(),
        ];
        let names: Vec<_> = filter_by_trip(&places, TripId::new(1))
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Levante", "MERAKI", "Safran"]);
        assert!(filter_by_trip(&places, TripId::new(4)).is_empty());
    }

    #[test]
    fn filter_hikes() {
        let hikes = vec![
            Hike::build().trip(1).name("Rehmhof-Weg").finish(),
            Hike::build().trip(2).name("Wasserfallsteig").finish(),
        ];
        let selected = filter_by_trip(&hikes, TripId::new(2));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Wasserfallsteig");
    }
}
