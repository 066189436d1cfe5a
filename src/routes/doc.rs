use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    billing::{FeeSchedule, FeeType, Totals},
    dto::{
        agenda::{
            AppointmentList, BookedAppointment, BookingItem, CancelAppointmentRequest,
            CompleteAppointmentRequest, CompletedCheckout, CreateAppointmentRequest, DayColumn,
            DayView, ProfessionalList, RangeView, UpdateAppointmentRequest,
        },
        customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
        permissions::{
            RoleGrants, RoleMatrix, StaffUserList, UpdateRoleMatrixRequest, UpdateUserRoleRequest,
        },
        reports::{ProfessionalRevenue, RevenueReport},
        settings::{
            ClosureList, ComboList, CreateClosureRequest, CreateComboRequest,
            CreatePaymentMethodRequest, CreateProcedureRequest, CreateProfessionalRequest,
            MatrixToggleRequest, OverrideList, PaymentMethodList, ProcedureList,
            UpdateClosureRequest, UpdateComboRequest, UpdatePaymentMethodRequest,
            UpdateProcedureRequest,
        },
    },
    models::{
        Appointment, AppointmentStatus, BusinessHours, CancelReason, Cancellation, Closure,
        ClosureScope, Combo, ComboItem, Customer, CustomerRef, DayInterval, DayKey, DaySchedule,
        DiscountKind, PaymentInfo, PaymentMethod, PaymentStatus, Procedure, ProcedureLine,
        ProcedureOverride, Professional, StaffUser,
    },
    rbac::Role,
    response::{ApiResponse, Meta},
    routes::{agenda, customers, health, params, permissions, reports, settings},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        agenda::list_professionals,
        agenda::list_appointments,
        agenda::get_appointment,
        agenda::create_appointment,
        agenda::update_appointment,
        agenda::confirm_appointment,
        agenda::cancel_appointment,
        agenda::complete_appointment,
        agenda::day_view,
        agenda::week_view,
        agenda::month_view,
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        settings::list_payment_methods,
        settings::create_payment_method,
        settings::update_payment_method,
        settings::delete_payment_method,
        settings::list_procedures,
        settings::create_procedure,
        settings::update_procedure,
        settings::delete_procedure,
        settings::list_professionals,
        settings::create_professional,
        settings::list_overrides,
        settings::toggle_matrix_cell,
        settings::list_combos,
        settings::create_combo,
        settings::update_combo,
        settings::delete_combo,
        settings::get_business_hours,
        settings::update_business_hours,
        settings::list_closures,
        settings::create_closure,
        settings::update_closure,
        settings::delete_closure,
        permissions::list_users,
        permissions::update_user_role,
        permissions::get_matrix,
        permissions::update_matrix,
        reports::revenue
    ),
    components(
        schemas(
            Appointment,
            AppointmentStatus,
            Cancellation,
            CancelReason,
            CustomerRef,
            ProcedureLine,
            PaymentInfo,
            PaymentStatus,
            Customer,
            Professional,
            Procedure,
            ProcedureOverride,
            PaymentMethod,
            Combo,
            ComboItem,
            DiscountKind,
            Closure,
            ClosureScope,
            BusinessHours,
            DaySchedule,
            DayInterval,
            DayKey,
            StaffUser,
            Role,
            FeeSchedule,
            FeeType,
            Totals,
            BookingItem,
            CreateAppointmentRequest,
            UpdateAppointmentRequest,
            CancelAppointmentRequest,
            CompleteAppointmentRequest,
            ProfessionalList,
            AppointmentList,
            BookedAppointment,
            CompletedCheckout,
            DayColumn,
            DayView,
            RangeView,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CustomerList,
            CreatePaymentMethodRequest,
            UpdatePaymentMethodRequest,
            PaymentMethodList,
            CreateProcedureRequest,
            UpdateProcedureRequest,
            ProcedureList,
            CreateProfessionalRequest,
            OverrideList,
            MatrixToggleRequest,
            CreateComboRequest,
            UpdateComboRequest,
            ComboList,
            CreateClosureRequest,
            UpdateClosureRequest,
            ClosureList,
            StaffUserList,
            UpdateUserRoleRequest,
            RoleGrants,
            RoleMatrix,
            UpdateRoleMatrixRequest,
            ProfessionalRevenue,
            RevenueReport,
            params::Pagination,
            params::Cohort,
            Meta,
            ApiResponse<Appointment>,
            ApiResponse<AppointmentList>,
            ApiResponse<BookedAppointment>,
            ApiResponse<CompletedCheckout>,
            ApiResponse<DayView>,
            ApiResponse<CustomerList>,
            ApiResponse<RevenueReport>
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "agenda", description = "Appointment booking, lifecycle and calendar views"),
        (name = "customers", description = "Customer base"),
        (name = "settings", description = "Catalog, matrix and operation settings"),
        (name = "permissions", description = "Staff roles and the permission matrix"),
        (name = "reports", description = "Revenue reporting"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
