//! Aggregation versus composition on cars and humans.

use relmod_tests::prelude::*;

mod ownership {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("vehicles")
            .steps("vehicles/steps.relmod")
            .step("declare_parts", |e| e.entities(2).valid())
            .step("declare_wholes", |e| e.entities(4).edges(0))
            .step("car_holds_engine", |e| {
                e.shares("Car", "Engine").cascade("Car", &[]).valid()
            })
            .step("human_owns_heart", |e| {
                e.owns("Human", "Heart")
                    .cascade("Human", &["Heart"])
                    .edges(2)
                    .valid()
            })
            .step("redeclare_car", |e| e.error("Duplicate entity: Car"))
            .step("owner_without_multiplicity", |e| {
                e.error("multiplicity is required")
            })
            .step("car_has_wheels", |e| {
                e.shares("Car", "Wheel").entities(5).edges(3).valid()
            })
            .step("remove_human", |e| e.entities(4).edges(2).errors(0))
    }

    #[test]
    fn test_cars_hold_engines_and_humans_own_hearts() {
        let model = scenario().run().unwrap();

        assert!(model.lookup("Human").is_err());
        assert!(model.lookup("Heart").is_ok());
    }
}

mod detach {
    use relmod_session::Model;

    #[test]
    fn test_detached_heart_leaves_no_edges() {
        // GIVEN
        let mut model = Model::new();
        model
            .apply_script("entity Heart\nentity Human\nedge Human composition Heart\n")
            .unwrap();
        let edge = model.edges_from("Human").next().map(|e| e.id).unwrap();

        // WHEN
        model.remove_edge(edge).unwrap();
        model.remove("Heart").unwrap();

        // THEN
        assert_eq!(model.graph().edge_count(), 0);
        assert_eq!(model.edges_from("Human").count(), 0);
        assert!(model.derive_ownership().records.is_empty());
        assert!(model.validate().is_valid());
    }
}
