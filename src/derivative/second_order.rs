use crate::stencil::Degree;




derivative_engine! {
    /**
     * Centered second derivative, `d2u/dx2`, using the symmetric stencil with
     * the given ghost width.
     */
    DerivativeSecondOrder, Degree::Second
}




// ============================================================================
#[cfg(test)]
mod test {

    use approx::assert_relative_eq;
    use super::DerivativeSecondOrder;
    use crate::derivative::Derivative;
    use crate::error::Error;
    use crate::field::Field;
    use crate::index_space::{range1d, range2d, Axis};

    #[test]
    fn eighth_order_stencil_gives_two_for_a_parabola() {
        let engine = DerivativeSecondOrder::<1>::new("d2/dx2", Axis::X, 4).unwrap();
        let data = Field::from_function(range1d(0..9), [4], |[i]| (i * i) as f64);
        let mut derivative = Field::zeros(range1d(0..9), [0], 1);

        assert_eq!(data.get([0], 0), 0.0);
        assert_eq!(data.get([8], 0), 64.0);

        engine.compute_derivative(&mut derivative, &data, 1.0, None, 0, 0).unwrap();

        for (_, value) in derivative.iter_interior(0) {
            assert_relative_eq!(value, 2.0, epsilon = 1e-11);
        }
    }

    #[test]
    fn stencils_are_exact_up_to_their_order() {
        // A symmetric stencil of order 2g is exact on polynomials of degree
        // 2g + 1.
        for g in 1..=4 {
            let engine = DerivativeSecondOrder::<1>::new("d2/dx2", Axis::X, g).unwrap();
            let p = 2 * g as i32 + 1;
            let dx = 0.5;
            let data = Field::from_function(range1d(0..7), [g], |[i]| (i as f64 * dx).powi(p) - 3.0);
            let mut derivative = Field::zeros(range1d(0..7), [0], 1);

            engine.compute_derivative(&mut derivative, &data, dx, None, 0, 0).unwrap();

            for ([i], value) in derivative.iter_interior(0) {
                let x = i as f64 * dx;
                let exact = (p * (p - 1)) as f64 * x.powi(p - 2);
                assert_relative_eq!(value, exact, epsilon = 1e-8, max_relative = 1e-11);
            }
        }
    }

    #[test]
    fn fourth_order_stencil_differentiates_a_cubic() {
        let engine = DerivativeSecondOrder::<1>::new("d2/dx2", Axis::X, 2).unwrap();
        let (a, b, c, d) = (0.3, -1.2, 2.5, 7.0);
        let dx = 0.1;
        let data = Field::from_function(range1d(0..20), [2], |[i]| {
            let x = i as f64 * dx;
            a * x * x * x + b * x * x + c * x + d
        });
        let mut derivative = Field::zeros(range1d(0..20), [0], 1);

        engine.compute_derivative(&mut derivative, &data, dx, None, 0, 0).unwrap();

        for ([i], value) in derivative.iter_interior(0) {
            let x = i as f64 * dx;
            assert_relative_eq!(value, 6.0 * a * x + 2.0 * b, epsilon = 1e-10);
        }
    }

    #[test]
    fn too_few_input_ghosts_fail_before_writing() {
        let engine = DerivativeSecondOrder::<1>::new("d2/dx2", Axis::X, 4).unwrap();
        let data = Field::from_function(range1d(0..9), [2], |[i]| (i * i) as f64);
        let mut derivative = Field::zeros(range1d(0..9), [0], 1);
        derivative.fill(-1.0);

        assert_eq!(
            engine.compute_derivative(&mut derivative, &data, 1.0, None, 0, 0),
            Err(Error::InsufficientGhosts { axis: Axis::X, required: 4, available: 2 }));
        assert!(derivative.data().iter().all(|&x| x == -1.0));
    }

    #[test]
    fn restricted_evaluation_leaves_the_rest_untouched() {
        let engine = DerivativeSecondOrder::<2>::new("d2/dy2", Axis::Y, 1).unwrap();
        let data = Field::from_function(range2d(0..5, 0..5), [0, 1], |[i, j]| (i + j * j) as f64);
        let mut derivative = Field::zeros(range2d(0..5, 0..5), [0, 0], 1);
        derivative.fill(f64::NAN);

        engine.compute_derivative(&mut derivative, &data, 1.0, Some(&range2d(1..3, 2..5)), 0, 0).unwrap();

        for [i, j] in range2d(0..5, 0..5).iter() {
            let value = derivative.get([i, j], 0);
            if (1..3).contains(&i) && (2..5).contains(&j) {
                assert_eq!(value, 2.0);
            } else {
                assert!(value.is_nan());
            }
        }
    }

    #[test]
    fn unsupported_ghost_width_fails_on_construction() {
        assert_eq!(
            DerivativeSecondOrder::<2>::new("d2/dx2", Axis::X, 0).unwrap_err(),
            Error::UnsupportedGhostWidth(0));
        assert_eq!(
            DerivativeSecondOrder::<1>::new("d2/dy2", Axis::Y, 2).unwrap_err(),
            Error::AxisOutOfRange { axis: Axis::Y, dim: 1 });
    }

    #[test]
    fn display_names_the_engine() {
        let engine = DerivativeSecondOrder::<2>::new("d2u/dx2", Axis::X, 3).unwrap();
        let text = engine.to_string();
        assert!(text.starts_with("DerivativeSecondOrder: d2u/dx2"));
        assert!(text.contains("num_derivative_ghosts = [3, 0]"));
    }
}
