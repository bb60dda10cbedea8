//! Seeded model with nested composition and shared members.

use relmod_tests::prelude::*;

mod library {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("library")
            .seed("library/seed.relmod")
            .steps("library/steps.relmod")
            .step("check_seed", |e| {
                e.valid()
                    .owns("Library", "Shelf")
                    .owns("Shelf", "Slot")
                    .shares("Slot", "Book")
                    .shares("Library", "Member")
                    .cascade("Library", &["Shelf", "Slot"])
                    .cascade("Slot", &[])
                    .entities(5)
                    .edges(4)
            })
            .step("remove_shelf", |e| {
                e.valid()
                    .cascade("Library", &[])
                    .entities(4)
                    .edges(2)
            })
            .step("remove_missing", |e| e.error("Unknown entity: Shelf"))
    }

    #[test]
    fn test_removing_an_entity_drops_its_edges() {
        let model = scenario().run().unwrap();

        assert!(model.is_validated());
        assert_eq!(model.edges_from("Library").count(), 1);
    }
}
